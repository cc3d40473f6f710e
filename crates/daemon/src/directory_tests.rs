// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use super::*;
use crate::http::build_client;
use mockito::{Matcher, Server};
use nb_core::Counters;
use yare::parameterized;

const TIMEOUT: Duration = Duration::from_secs(5);

fn report() -> SyncReport {
    let mut stats = BTreeMap::new();
    stats.insert("peer.example:1".to_string(), Counters { all: 7, new: 2, ..Counters::default() });
    SyncReport {
        username: "123456789012345678".into(),
        node: "node.example:1337".into(),
        password: "directory-secret".into(),
        pinned_count: 2,
        stats,
    }
}

async fn exchange_with(server: &Server) -> SyncResult<Vec<String>> {
    let directory = HttpDirectory::new(build_client().unwrap());
    let url = format!("{}/api.php", server.url());
    directory.exchange(&url, TIMEOUT, &report()).await
}

#[tokio::test]
async fn exchange_posts_report_and_returns_neighbors() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "123456789012345678".into()),
            Matcher::UrlEncoded("node".into(), "node.example:1337".into()),
            Matcher::UrlEncoded("password".into(), "directory-secret".into()),
            Matcher::UrlEncoded("static".into(), "2".into()),
            Matcher::UrlEncoded(
                "stats".into(),
                r#"{"peer.example:1":{"all":7,"new":2,"requested":0,"invalid":0,"ignored":0}}"#
                    .into(),
            ),
        ]))
        .with_body(r#"{"success":true,"neighbors":["a.example:1","b.example:2"]}"#)
        .create_async()
        .await;

    let neighbors = exchange_with(&server).await.unwrap();

    mock.assert_async().await;
    assert_eq!(neighbors, vec!["a.example:1".to_string(), "b.example:2".to_string()]);
}

#[tokio::test]
async fn declared_failure_is_remote_rejection() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api.php")
        .with_body(r#"{"success": false, "error": "bad password"}"#)
        .create_async()
        .await;

    let err = exchange_with(&server).await.unwrap_err();
    assert_eq!(err, SyncError::RemoteRejection("bad password".into()));
}

#[tokio::test]
async fn declared_failure_without_reason_has_empty_reason() {
    let mut server = Server::new_async().await;
    server.mock("POST", "/api.php").with_body(r#"{"success": false}"#).create_async().await;

    let err = exchange_with(&server).await.unwrap_err();
    assert_eq!(err, SyncError::RemoteRejection(String::new()));
}

#[parameterized(
    not_json = { "service unavailable" },
    missing_neighbors = { r#"{"success": true}"# },
    neighbors_not_strings = { r#"{"success": true, "neighbors": [1, 2]}"# },
)]
#[test_macro(tokio::test)]
async fn malformed_body_is_transport_error(body: &str) {
    let mut server = Server::new_async().await;
    server.mock("POST", "/api.php").with_body(body).create_async().await;

    let err = exchange_with(&server).await.unwrap_err();
    assert!(matches!(err, SyncError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_transport_error() {
    let mut server = Server::new_async().await;
    server.mock("POST", "/api.php").with_status(502).create_async().await;

    let err = exchange_with(&server).await.unwrap_err();
    assert!(matches!(err, SyncError::Transport(ref reason) if reason.contains("502")));
}
