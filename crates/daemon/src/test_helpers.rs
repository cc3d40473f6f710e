// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mocks and fixtures shared by the daemon's unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nb_core::{AgentConfig, ClockSource, NeighborRecord, SyncReport};

use crate::directory::{Directory, DirectoryFuture};
use crate::error::{SyncError, SyncResult};
use crate::host::{AdminAccess, Host, HostError, HostFuture};

/// A config that passes validation.
pub fn valid_config() -> AgentConfig {
    AgentConfig {
        admin_password: "secure_pass".to_string(),
        directory_secret: "directory-secret".to_string(),
        operator_id: "123456789012345678".to_string(),
        node_address: "node.example:1337".to_string(),
        ..AgentConfig::default()
    }
}

#[derive(Default)]
struct DirectoryState {
    replies: VecDeque<SyncResult<Vec<String>>>,
    fallback: Option<SyncResult<Vec<String>>>,
    reports: Vec<SyncReport>,
    urls: Vec<String>,
}

/// Scripted [`Directory`] that records every report it receives.
///
/// Queued replies are served first, then the fallback reply forever.
#[derive(Clone, Default)]
pub struct MockDirectory {
    state: Arc<Mutex<DirectoryState>>,
}

impl MockDirectory {
    /// Always answers with `neighbors`.
    pub fn accepting(neighbors: &[&str]) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().fallback =
            Some(Ok(neighbors.iter().map(|s| s.to_string()).collect()));
        mock
    }

    /// Always fails with `err`.
    pub fn failing(err: SyncError) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().fallback = Some(Err(err));
        mock
    }

    /// Serves `reply` before falling back.
    pub fn queue(&self, reply: SyncResult<Vec<String>>) {
        self.state.lock().unwrap().replies.push_back(reply);
    }

    pub fn reports(&self) -> Vec<SyncReport> {
        self.state.lock().unwrap().reports.clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.state.lock().unwrap().urls.clone()
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().reports.len()
    }
}

impl Directory for MockDirectory {
    fn exchange<'a>(
        &'a self,
        url: &'a str,
        _timeout: Duration,
        report: &'a SyncReport,
    ) -> DirectoryFuture<'a> {
        let mut state = self.state.lock().unwrap();
        state.reports.push(report.clone());
        state.urls.push(url.to_string());
        let reply = match state.replies.pop_front() {
            Some(reply) => reply,
            None => state.fallback.clone().unwrap_or_else(|| Ok(Vec::new())),
        };
        Box::pin(async move { reply })
    }
}

/// A call made against [`MockHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    List { since_ms: u64 },
    Add(String),
    Remove(String),
}

#[derive(Default)]
struct HostState {
    neighbors: Vec<NeighborRecord>,
    list_error: Option<HostError>,
    refused: BTreeSet<String>,
    calls: Vec<HostCall>,
}

/// In-memory node. Successful adds and removes change its neighbor list.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Arc<Mutex<HostState>>,
}

impl MockHost {
    pub fn with_neighbors(neighbors: Vec<NeighborRecord>) -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().neighbors = neighbors;
        mock
    }

    /// Neighbors with no samples.
    pub fn with_addresses(addresses: &[&str]) -> Self {
        Self::with_neighbors(addresses.iter().map(|a| NeighborRecord::new(*a, Vec::new())).collect())
    }

    /// Makes `list_neighbors` fail.
    pub fn fail_listing(&self, err: HostError) {
        self.state.lock().unwrap().list_error = Some(err);
    }

    /// Makes every add or remove of `address` fail.
    pub fn refuse(&self, address: &str) {
        self.state.lock().unwrap().refused.insert(address.to_string());
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the add and remove calls, in order.
    pub fn mutations(&self) -> Vec<HostCall> {
        self.calls().into_iter().filter(|c| !matches!(c, HostCall::List { .. })).collect()
    }

    pub fn addresses(&self) -> BTreeSet<String> {
        self.state.lock().unwrap().neighbors.iter().map(|n| n.address.clone()).collect()
    }

    fn record_change(&self, call: HostCall, address: &str) -> Result<(), HostError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        if state.refused.contains(address) {
            return Err(HostError::Refused(format!("cannot change {address}")));
        }
        match call {
            HostCall::Add(_) => state.neighbors.push(NeighborRecord::new(address, Vec::new())),
            HostCall::Remove(_) => state.neighbors.retain(|n| n.address != address),
            HostCall::List { .. } => {}
        }
        Ok(())
    }
}

impl Host for MockHost {
    fn list_neighbors<'a>(
        &'a self,
        _access: &'a AdminAccess,
        since_ms: u64,
    ) -> HostFuture<'a, Vec<NeighborRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(HostCall::List { since_ms });
        let result = match &state.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.neighbors.clone()),
        };
        Box::pin(async move { result })
    }

    fn add_neighbor<'a>(&'a self, _access: &'a AdminAccess, address: &'a str) -> HostFuture<'a, ()> {
        let result = self.record_change(HostCall::Add(address.to_string()), address);
        Box::pin(async move { result })
    }

    fn remove_neighbor<'a>(
        &'a self,
        _access: &'a AdminAccess,
        address: &'a str,
    ) -> HostFuture<'a, ()> {
        let result = self.record_change(HostCall::Remove(address.to_string()), address);
        Box::pin(async move { result })
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    now_ms: u64,
}

impl MockClock {
    pub fn at(now_ms: u64) -> Self {
        MockClock { now_ms }
    }
}

impl ClockSource for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}
