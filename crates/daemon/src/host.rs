// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Access to the local node through its admin API.
//!
//! Provides a trait-based host layer so the reconciler can run against:
//! - the node's HTTP admin API in production
//! - an in-memory mock in tests

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use nb_core::protocol::{parse_ack_reply, parse_neighbors_reply};
use nb_core::{AdminEndpoint, AgentConfig, NeighborRecord, Reply};
use reqwest::Client;

use crate::http::post_form;

/// Error type for host operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The admin API could not be reached or answered with garbage.
    #[error("{0}")]
    Unreachable(String),

    /// The admin API answered `success: false`.
    #[error("node refused: {0}")]
    Refused(String),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Boxed future returned by [`Host`] methods.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = HostResult<T>> + Send + 'a>>;

/// Where and how to reach the admin API, taken from one config snapshot.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccess {
    pub base_url: String,
    pub password: String,
    pub timeout: Duration,
}

impl AdminAccess {
    pub fn from_config(config: &AgentConfig) -> Self {
        AdminAccess {
            base_url: config.admin_base_url(),
            password: config.admin_password.clone(),
            timeout: config.request_timeout(),
        }
    }

    fn url(&self, endpoint: AdminEndpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

impl std::fmt::Debug for AdminAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccess")
            .field("base_url", &self.base_url)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The node whose neighbor list is being reconciled.
pub trait Host: Send + Sync {
    /// Lists current neighbors with their samples newer than `since_ms`.
    fn list_neighbors<'a>(
        &'a self,
        access: &'a AdminAccess,
        since_ms: u64,
    ) -> HostFuture<'a, Vec<NeighborRecord>>;

    /// Adds `address` as a neighbor.
    fn add_neighbor<'a>(&'a self, access: &'a AdminAccess, address: &'a str) -> HostFuture<'a, ()>;

    /// Removes `address` from the neighbors.
    fn remove_neighbor<'a>(
        &'a self,
        access: &'a AdminAccess,
        address: &'a str,
    ) -> HostFuture<'a, ()>;
}

/// [`Host`] backed by the node's HTTP admin API.
pub struct AdminApiHost {
    client: Client,
}

impl AdminApiHost {
    pub fn new(client: Client) -> Self {
        AdminApiHost { client }
    }

    async fn call(
        &self,
        access: &AdminAccess,
        endpoint: AdminEndpoint,
        field: (&'static str, String),
    ) -> HostResult<String> {
        let form = [("password", access.password.clone()), field];
        post_form(&self.client, &access.url(endpoint), access.timeout, &form)
            .await
            .map_err(HostError::Unreachable)
    }

    async fn change(
        &self,
        access: &AdminAccess,
        endpoint: AdminEndpoint,
        address: &str,
    ) -> HostResult<()> {
        let body = self.call(access, endpoint, ("address", address.to_string())).await?;
        match parse_ack_reply(&body) {
            Ok(Reply::Accepted(())) => Ok(()),
            Ok(Reply::Rejected(reason)) => Err(HostError::Refused(reason)),
            Err(e) => Err(HostError::Unreachable(e.to_string())),
        }
    }
}

impl Host for AdminApiHost {
    fn list_neighbors<'a>(
        &'a self,
        access: &'a AdminAccess,
        since_ms: u64,
    ) -> HostFuture<'a, Vec<NeighborRecord>> {
        Box::pin(async move {
            let body = self
                .call(access, AdminEndpoint::GetNeighbors, ("timestamp_min", since_ms.to_string()))
                .await?;
            match parse_neighbors_reply(&body) {
                Ok(Reply::Accepted(neighbors)) => Ok(neighbors),
                Ok(Reply::Rejected(reason)) => Err(HostError::Refused(reason)),
                Err(e) => Err(HostError::Unreachable(e.to_string())),
            }
        })
    }

    fn add_neighbor<'a>(&'a self, access: &'a AdminAccess, address: &'a str) -> HostFuture<'a, ()> {
        Box::pin(self.change(access, AdminEndpoint::AddNeighbor, address))
    }

    fn remove_neighbor<'a>(
        &'a self,
        access: &'a AdminAccess,
        address: &'a str,
    ) -> HostFuture<'a, ()> {
        Box::pin(self.change(access, AdminEndpoint::RemoveNeighbor, address))
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
