// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! nb-core: Shared library for the nbsync neighbor agent
//!
//! This crate holds the pure parts of the agent: the stats window, the
//! reconciliation diff, the backoff factor, the outbound report, the wire
//! shapes of the directory and admin APIs, and the typed configuration.
//! Network I/O and the control loop live in the `nbsyncd` daemon.

pub mod backoff;
pub mod clock;
pub mod config;
pub mod diff;
pub mod error;
pub mod protocol;
pub mod report;
pub mod sample;
pub mod stats;

pub use backoff::{Backoff, BackoffPolicy};
pub use clock::{ClockSource, SystemClock};
pub use config::{AgentConfig, Violation};
pub use diff::{plan, ReconciliationPlan};
pub use error::{Error, Result};
pub use protocol::{AdminEndpoint, Reply};
pub use report::SyncReport;
pub use sample::{Counters, InteractionSample, NeighborRecord};
pub use stats::summarize;
