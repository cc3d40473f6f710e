// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unix signal handling.
//!
//! - SIGHUP: re-read and validate the config file
//! - SIGINT, SIGTERM: cancel the stop token

use std::path::{Path, PathBuf};

use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::settings::{self, ConfigHandle};

/// Installs the handlers and spawns the task serving them.
///
/// Handlers are registered before this returns. The task ends once `stop`
/// is cancelled.
pub fn spawn(
    config: ConfigHandle,
    path: PathBuf,
    stop: CancellationToken,
) -> std::io::Result<JoinHandle<()>> {
    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                Some(()) = sighup.recv() => {
                    tracing::info!("received SIGHUP, reloading {}", path.display());
                    reload_config(&config, &path);
                }
                Some(()) = sigint.recv() => {
                    tracing::info!("received SIGINT, stopping");
                    stop.cancel();
                }
                Some(()) = sigterm.recv() => {
                    tracing::info!("received SIGTERM, stopping");
                    stop.cancel();
                }
                else => break,
            }
        }
    }))
}

/// Swaps in the config at `path`, keeping the current one on any error.
pub fn reload_config(config: &ConfigHandle, path: &Path) {
    match settings::reload(config, path) {
        Ok(()) => tracing::info!("configuration reloaded"),
        Err(nb_core::Error::InvalidConfig(violations)) => {
            for violation in &violations {
                tracing::warn!("{}", violation);
            }
            tracing::warn!("keeping previous configuration");
        }
        Err(e) => tracing::warn!("keeping previous configuration: {}", e),
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
