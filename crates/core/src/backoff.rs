// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multiplicative backoff applied to the sync interval after failed cycles.
//!
//! The factor starts at 1, is multiplied by `growth` after every failure
//! (capped at `max_factor`) and snaps back to 1 after a successful cycle.

use std::time::Duration;

/// Growth and cap of the backoff factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    /// Multiplier applied on each failure (> 1).
    pub growth: f64,
    /// Upper bound of the factor (>= 1).
    pub max_factor: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy { growth: 1.4, max_factor: 8.0 }
    }
}

/// Current backoff factor, always within `[1, max_factor]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    factor: f64,
}

impl Backoff {
    /// Creates a backoff at factor 1.
    pub fn new() -> Self {
        Backoff { factor: 1.0 }
    }

    /// Returns the current factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Resets the factor to 1 after a successful cycle.
    pub fn reset(&mut self) {
        self.factor = 1.0;
    }

    /// Grows the factor after a failed cycle and returns the new value.
    pub fn escalate(&mut self, policy: &BackoffPolicy) -> f64 {
        let cap = policy.max_factor.max(1.0);
        self.factor = (self.factor * policy.growth).clamp(1.0, cap);
        self.factor
    }

    /// Scales the base interval by the current factor.
    ///
    /// Saturates at [`Duration::MAX`] when the product does not fit.
    pub fn scale(&self, base: Duration) -> Duration {
        Duration::try_from_secs_f64(base.as_secs_f64() * self.factor).unwrap_or(Duration::MAX)
    }

    /// Time left until the next cycle is due, never less than 1ms.
    ///
    /// The next cycle is due `base × factor` after `last_sync_ms`.
    pub fn next_delay(&self, base: Duration, last_sync_ms: u64, now_ms: u64) -> Duration {
        let interval_ms = u64::try_from(self.scale(base).as_millis()).unwrap_or(u64::MAX);
        let due_ms = last_sync_ms.saturating_add(interval_ms);
        Duration::from_millis(due_ms.saturating_sub(now_ms).max(1))
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
