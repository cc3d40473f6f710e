// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire shapes of the directory and node admin APIs.
//!
//! Both APIs answer every POST with the same JSON envelope:
//! - `{"success": true, "neighbors": [...]}` on success
//! - `{"success": false, "error": "reason"}` on a declared failure
//!
//! The directory lists neighbors as plain `host:port` strings; the admin
//! API's `getNeighbors` lists [`NeighborRecord`]s with their samples.

use std::fmt;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::sample::NeighborRecord;

/// Endpoints of the node's local admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminEndpoint {
    GetNeighbors,
    AddNeighbor,
    RemoveNeighbor,
}

impl AdminEndpoint {
    /// Path segment appended to the admin base URL.
    pub fn path(self) -> &'static str {
        match self {
            AdminEndpoint::GetNeighbors => "getNeighbors",
            AdminEndpoint::AddNeighbor => "addNeighbor",
            AdminEndpoint::RemoveNeighbor => "removeNeighbor",
        }
    }
}

impl fmt::Display for AdminEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// `success: true` with its payload.
    Accepted(T),
    /// `success: false` with the server's reason (empty if none was given).
    Rejected(String),
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    error: Option<String>,
    neighbors: Option<T>,
}

fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Reply<Option<T>>> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| Error::Malformed(format!("invalid response body: {}", e)))?;
    if envelope.success {
        Ok(Reply::Accepted(envelope.neighbors))
    } else {
        Ok(Reply::Rejected(envelope.error.unwrap_or_default()))
    }
}

fn require_neighbors<T>(reply: Reply<Option<T>>) -> Result<Reply<T>> {
    match reply {
        Reply::Accepted(Some(neighbors)) => Ok(Reply::Accepted(neighbors)),
        Reply::Accepted(None) => {
            Err(Error::Malformed("response declares success but lists no neighbors".to_string()))
        }
        Reply::Rejected(reason) => Ok(Reply::Rejected(reason)),
    }
}

/// Parses the directory's answer to a sync report.
///
/// # Errors
///
/// Returns [`Error::Malformed`] if the body is not the expected envelope or a
/// successful reply carries no neighbor list.
pub fn parse_directory_reply(body: &str) -> Result<Reply<Vec<String>>> {
    require_neighbors(parse_envelope(body)?)
}

/// Parses the admin API's answer to `getNeighbors`.
pub fn parse_neighbors_reply(body: &str) -> Result<Reply<Vec<NeighborRecord>>> {
    require_neighbors(parse_envelope(body)?)
}

/// Parses the admin API's answer to `addNeighbor` / `removeNeighbor`.
pub fn parse_ack_reply(body: &str) -> Result<Reply<()>> {
    Ok(match parse_envelope::<IgnoredAny>(body)? {
        Reply::Accepted(_) => Reply::Accepted(()),
        Reply::Rejected(reason) => Reply::Rejected(reason),
    })
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
