// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Trailing-window aggregation of interaction samples.
//!
//! Windows are half-open: a sample belongs to `(window_start, window_end]`.
//! Consecutive cycles use the previous cycle's end as the next start, so a
//! sample stamped exactly on the boundary is counted once, in the earlier
//! window.

use crate::sample::{Counters, InteractionSample};

/// Returns true if `timestamp` falls inside `(window_start, window_end]`.
pub fn in_window(timestamp: u64, window_start: u64, window_end: u64) -> bool {
    timestamp > window_start && timestamp <= window_end
}

/// Sums the counters of every sample inside the window.
///
/// Returns all-zero counters when no sample qualifies.
pub fn summarize(samples: &[InteractionSample], window_start: u64, window_end: u64) -> Counters {
    samples
        .iter()
        .filter(|s| in_window(s.timestamp, window_start, window_end))
        .fold(Counters::default(), |acc, s| acc + s.counters)
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
