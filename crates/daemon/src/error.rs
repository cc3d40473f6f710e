// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync daemon.

use thiserror::Error;

/// Why a reconciliation step did not complete.
///
/// None of these end the loop; only the stop token does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The node address is still a loopback placeholder.
    #[error("node address '{address}' is not reachable by peers")]
    ConfigurationNotReady { address: String },

    /// The directory could not be reached or answered with garbage.
    #[error("transport error: {0}")]
    Transport(String),

    /// The directory answered `success: false`.
    #[error("directory rejected the report: {0}")]
    RemoteRejection(String),

    /// Listing the node's current neighbors failed.
    #[error("host query failed: {0}")]
    HostQuery(String),

    /// A single add or remove against the node failed.
    #[error("failed to apply change for {address}: {reason}")]
    LocalApply { address: String, reason: String },
}

/// Result type for one sync step.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Fatal daemon errors, raised during startup or a one-shot run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] nb_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Sync(#[from] SyncError),
}

/// A specialized Result type for daemon operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
