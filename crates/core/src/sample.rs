// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-neighbor traffic counters as exposed by the node's admin API.
//!
//! Each neighbor carries a list of measurement rounds. A round is a
//! timestamped set of counter deltas:
//!
//! ```json
//! {"address": "example.org:1337",
//!  "stats": [{"timestamp": 1700000000000, "all": 12, "new": 3, "requested": 1}]}
//! ```
//!
//! Counters missing from a round are read as zero.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Named traffic counters for one neighbor.
///
/// Used both for a single measurement round and for the sum over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    /// Every transaction received from the neighbor.
    pub all: u64,
    /// Transactions not seen before.
    pub new: u64,
    /// Transactions the neighbor asked us for.
    pub requested: u64,
    /// Transactions that failed validation.
    pub invalid: u64,
    /// Transactions dropped without processing.
    pub ignored: u64,
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Self) {
        self.all = self.all.saturating_add(rhs.all);
        self.new = self.new.saturating_add(rhs.new);
        self.requested = self.requested.saturating_add(rhs.requested);
        self.invalid = self.invalid.saturating_add(rhs.invalid);
        self.ignored = self.ignored.saturating_add(rhs.ignored);
    }
}

impl Add for Counters {
    type Output = Counters;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

#[cfg(test)]
impl Counters {
    /// Test helper: every counter is zero.
    pub(crate) fn is_zero(&self) -> bool {
        *self == Counters::default()
    }
}

/// One measurement round for a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSample {
    /// End of the round in milliseconds since Unix epoch.
    pub timestamp: u64,
    #[serde(flatten)]
    pub counters: Counters,
}

impl InteractionSample {
    pub fn new(timestamp: u64, counters: Counters) -> Self {
        InteractionSample { timestamp, counters }
    }
}

/// A neighbor as listed by the host node, with its recent samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// `host:port` address, unique per neighbor.
    pub address: String,
    #[serde(default)]
    pub stats: Vec<InteractionSample>,
}

impl NeighborRecord {
    pub fn new(address: impl Into<String>, stats: Vec<InteractionSample>) -> Self {
        NeighborRecord { address: address.into(), stats }
    }
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;
