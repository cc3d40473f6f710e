// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync report sent to the directory each cycle.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::sample::{Counters, NeighborRecord};
use crate::stats::summarize;

/// Credentials, pinned count and per-neighbor traffic for one cycle.
///
/// Pinned neighbors are counted but their traffic is never reported.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Operator identity (`username` field).
    pub username: String,
    /// This node's reachable address (`node` field).
    pub node: String,
    /// Directory shared secret (`password` field).
    pub password: String,
    /// Number of pinned neighbors (`static` field).
    pub pinned_count: usize,
    /// Windowed traffic per non-pinned neighbor (`stats` field).
    pub stats: BTreeMap<String, Counters>,
}

impl SyncReport {
    /// Builds the report for the window `(window_start, window_end]`.
    pub fn build(
        config: &AgentConfig,
        neighbors: &[NeighborRecord],
        window_start: u64,
        window_end: u64,
    ) -> Self {
        let pinned = config.pinned_neighbors();
        SyncReport {
            username: config.operator_id.clone(),
            node: config.node_address.clone(),
            password: config.directory_secret.clone(),
            pinned_count: pinned.len(),
            stats: collect_stats(neighbors, &pinned, window_start, window_end),
        }
    }

    /// Form fields in the order the directory expects them.
    pub fn to_form(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("username", self.username.clone()),
            ("node", self.node.clone()),
            ("password", self.password.clone()),
            ("static", self.pinned_count.to_string()),
            ("stats", serde_json::to_string(&self.stats)?),
        ])
    }
}

impl fmt::Debug for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncReport")
            .field("username", &self.username)
            .field("node", &self.node)
            .field("password", &"<redacted>")
            .field("pinned_count", &self.pinned_count)
            .field("stats", &self.stats)
            .finish()
    }
}

fn collect_stats(
    neighbors: &[NeighborRecord],
    pinned: &BTreeSet<String>,
    window_start: u64,
    window_end: u64,
) -> BTreeMap<String, Counters> {
    neighbors
        .iter()
        .filter(|n| !pinned.contains(&n.address))
        .map(|n| (n.address.clone(), summarize(&n.stats, window_start, window_end)))
        .collect()
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
