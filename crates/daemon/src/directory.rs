// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client for the remote neighbor directory.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use nb_core::protocol::parse_directory_reply;
use nb_core::{Reply, SyncReport};
use reqwest::Client;

use crate::error::{SyncError, SyncResult};
use crate::http::post_form;

/// Boxed future returned by [`Directory::exchange`].
pub type DirectoryFuture<'a> = Pin<Box<dyn Future<Output = SyncResult<Vec<String>>> + Send + 'a>>;

/// The authority that decides this node's neighbors.
pub trait Directory: Send + Sync {
    /// Sends `report` to `url` and returns the authoritative neighbor list.
    ///
    /// Makes exactly one attempt bounded by `timeout`.
    fn exchange<'a>(
        &'a self,
        url: &'a str,
        timeout: Duration,
        report: &'a SyncReport,
    ) -> DirectoryFuture<'a>;
}

/// [`Directory`] reached over HTTPS.
pub struct HttpDirectory {
    client: Client,
}

impl HttpDirectory {
    pub fn new(client: Client) -> Self {
        HttpDirectory { client }
    }
}

impl Directory for HttpDirectory {
    fn exchange<'a>(
        &'a self,
        url: &'a str,
        timeout: Duration,
        report: &'a SyncReport,
    ) -> DirectoryFuture<'a> {
        Box::pin(async move {
            let form = report.to_form().map_err(|e| SyncError::Transport(e.to_string()))?;
            let body =
                post_form(&self.client, url, timeout, &form).await.map_err(SyncError::Transport)?;
            tracing::debug!(%url, %body, "directory response");

            match parse_directory_reply(&body) {
                Ok(Reply::Accepted(neighbors)) => Ok(neighbors),
                Ok(Reply::Rejected(reason)) => Err(SyncError::RemoteRejection(reason)),
                Err(e) => Err(SyncError::Transport(e.to_string())),
            }
        })
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
