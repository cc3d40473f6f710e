// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciliation loop.
//!
//! Each cycle gathers the node's neighbors and traffic, reports them to the
//! directory, and converges the node onto the directory's answer:
//!
//! ```text
//! list_neighbors ──► SyncReport ──► exchange ──► plan ──► remove*, add*
//! ```
//!
//! Failed cycles stretch the interval by the backoff factor; a successful
//! one resets it.

use std::collections::BTreeSet;
use std::time::Duration;

use nb_core::{plan, AgentConfig, Backoff, ClockSource, ReconciliationPlan, SyncReport, SystemClock};
use tokio_util::sync::CancellationToken;

use crate::directory::Directory;
use crate::error::{SyncError, SyncResult};
use crate::host::{AdminAccess, Host};
use crate::settings::ConfigHandle;

/// What applying a plan did to the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub added: usize,
    pub removed: usize,
    /// One [`SyncError::LocalApply`] per command the node refused.
    pub failed: Vec<SyncError>,
}

/// Result of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The node address is a placeholder; nothing was contacted.
    Skipped,
    /// The directory answered and the plan was applied.
    Synced(ApplySummary),
    /// The cycle failed before touching the node.
    Failed(SyncError),
}

/// Drives sync cycles against a directory and a host.
pub struct Reconciler<D, H, C = SystemClock> {
    config: ConfigHandle,
    directory: D,
    host: H,
    clock: C,
    backoff: Backoff,
    last_sync_ms: Option<u64>,
}

impl<D: Directory, H: Host> Reconciler<D, H> {
    pub fn new(config: ConfigHandle, directory: D, host: H) -> Self {
        Self::with_clock(config, directory, host, SystemClock)
    }
}

impl<D: Directory, H: Host, C: ClockSource> Reconciler<D, H, C> {
    pub fn with_clock(config: ConfigHandle, directory: D, host: H, clock: C) -> Self {
        Reconciler { config, directory, host, clock, backoff: Backoff::new(), last_sync_ms: None }
    }

    /// Runs one cycle at wall-clock time `now_ms`.
    ///
    /// Traffic is reported for `(last_sync, now]`; the first cycle looks back
    /// one base interval. `last_sync` advances even when the cycle is skipped
    /// or fails.
    pub async fn run_cycle(&mut self, now_ms: u64) -> CycleOutcome {
        let config = self.config.snapshot();
        let window_start = match self.last_sync_ms {
            Some(last) => last,
            None => now_ms.saturating_sub(duration_ms(config.sync_interval())),
        };
        self.last_sync_ms = Some(now_ms);
        tracing::debug!(window_start, window_end = now_ms, "starting sync cycle");

        if config.is_placeholder_address() {
            let reason = SyncError::ConfigurationNotReady { address: config.node_address.clone() };
            tracing::warn!("skipping sync: {}", reason);
            return CycleOutcome::Skipped;
        }

        match self.sync(&config, window_start, now_ms).await {
            Ok(summary) => {
                self.backoff.reset();
                tracing::info!(
                    added = summary.added,
                    removed = summary.removed,
                    failed = summary.failed.len(),
                    "sync complete"
                );
                CycleOutcome::Synced(summary)
            }
            Err(err) => {
                let factor = self.backoff.escalate(&config.backoff_policy());
                tracing::error!(backoff_factor = factor, "sync failed: {}", err);
                CycleOutcome::Failed(err)
            }
        }
    }

    async fn sync(
        &self,
        config: &AgentConfig,
        window_start: u64,
        window_end: u64,
    ) -> SyncResult<ApplySummary> {
        let access = AdminAccess::from_config(config);
        let neighbors = self
            .host
            .list_neighbors(&access, window_start)
            .await
            .map_err(|e| SyncError::HostQuery(e.to_string()))?;

        let report = SyncReport::build(config, &neighbors, window_start, window_end);
        let authoritative: BTreeSet<String> = self
            .directory
            .exchange(&config.directory_url, config.request_timeout(), &report)
            .await?
            .into_iter()
            .collect();

        let local: BTreeSet<String> = neighbors.into_iter().map(|n| n.address).collect();
        let plan = plan(&authoritative, &local, &config.pinned_neighbors());
        if plan.is_empty() {
            tracing::debug!("neighbors already match the directory");
            return Ok(ApplySummary::default());
        }
        tracing::debug!(changes = plan.len(), "applying reconciliation plan");
        Ok(self.apply(&access, &plan).await)
    }

    /// Removes first, then adds. Each command stands alone; failures are
    /// collected and never rolled back.
    async fn apply(&self, access: &AdminAccess, plan: &ReconciliationPlan) -> ApplySummary {
        let mut summary = ApplySummary::default();

        for address in &plan.to_remove {
            match self.host.remove_neighbor(access, address).await {
                Ok(()) => {
                    tracing::info!(%address, "removed neighbor");
                    summary.removed += 1;
                }
                Err(e) => summary.failed.push(apply_failure(address, e)),
            }
        }

        for address in &plan.to_add {
            match self.host.add_neighbor(access, address).await {
                Ok(()) => {
                    tracing::info!(%address, "added neighbor");
                    summary.added += 1;
                }
                Err(e) => summary.failed.push(apply_failure(address, e)),
            }
        }

        summary
    }

    /// Time to wait after `now_ms` before the next cycle, at least 1ms.
    pub fn next_delay(&self, now_ms: u64) -> Duration {
        let base = self.config.snapshot().sync_interval();
        self.backoff.next_delay(base, self.last_sync_ms.unwrap_or(now_ms), now_ms)
    }

    /// Runs cycles until `stop` is cancelled.
    ///
    /// A cycle in progress finishes; the sleep between cycles is cut short.
    pub async fn run(&mut self, stop: CancellationToken) {
        while !stop.is_cancelled() {
            let now = self.clock.now_ms();
            self.run_cycle(now).await;

            let delay = self.next_delay(self.clock.now_ms());
            tracing::debug!(delay_ms = duration_ms(delay), "next sync scheduled");
            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
        tracing::info!("reconciler stopped");
    }
}

fn apply_failure(address: &str, err: impl std::fmt::Display) -> SyncError {
    let err = SyncError::LocalApply { address: address.to_string(), reason: err.to_string() };
    tracing::warn!("{}", err);
    err
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
