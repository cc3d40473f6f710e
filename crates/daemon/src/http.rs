// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Form-encoded POST shared by the directory and admin clients.

use std::time::Duration;

use reqwest::Client;

/// Builds the HTTP client shared by both APIs.
///
/// Timeouts are set per request so a reloaded config applies to the next
/// cycle without rebuilding the client.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("nbsyncd/", env!("CARGO_PKG_VERSION")))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

/// POSTs `form` to `url` and returns the response body.
///
/// Fails on connection errors, timeouts and non-2xx statuses, with the
/// reason rendered as a string.
pub async fn post_form(
    client: &Client,
    url: &str,
    timeout: Duration,
    form: &[(&str, String)],
) -> Result<String, String> {
    let response = client
        .post(url)
        .timeout(timeout)
        .form(form)
        .send()
        .await
        .map_err(|e| format!("request to {} failed: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("{} answered HTTP {}", url, status));
    }

    response.text().await.map_err(|e| format!("failed to read response from {}: {}", url, e))
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
