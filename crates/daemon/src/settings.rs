// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file location and the live configuration handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use nb_core::AgentConfig;

use crate::env;

/// Directory name under the platform config dir.
const APP_DIR: &str = "nbsync";
/// Config filename within [`APP_DIR`].
const CONFIG_NAME: &str = "config.toml";

/// Shared, atomically swappable configuration.
///
/// The reconciler takes one [`snapshot`](Self::snapshot) per cycle, so an
/// update only takes effect at the next cycle.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<AgentConfig>>,
}

impl ConfigHandle {
    pub fn new(config: AgentConfig) -> Self {
        ConfigHandle { inner: Arc::new(ArcSwap::from_pointee(config)) }
    }

    /// Current configuration.
    pub fn snapshot(&self) -> Arc<AgentConfig> {
        self.inner.load_full()
    }

    /// Validates `config` and swaps it in. The previous value is kept on error.
    pub fn try_update(&self, config: AgentConfig) -> nb_core::Result<()> {
        let config = config.validated()?;
        self.inner.store(Arc::new(config));
        Ok(())
    }
}

/// Resolves the config file path.
///
/// Precedence: `--config`, then `NBSYNC_CONFIG`, then `$XDG_CONFIG_HOME/nbsync`,
/// then the platform config dir.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    choose_config_path(explicit, env::config_path(), env::xdg_config_home(), dirs::config_dir())
}

fn choose_config_path(
    explicit: Option<PathBuf>,
    env_override: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit.or(env_override) {
        return path;
    }
    xdg_config_home
        .or(platform_dir)
        .map(|dir| dir.join(APP_DIR).join(CONFIG_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_NAME))
}

/// Loads the configuration used at startup.
///
/// A missing file yields the defaults, which keep the loop idle until the
/// node address is set. An existing file must parse and validate.
pub fn load_startup_config(path: &Path) -> nb_core::Result<AgentConfig> {
    if !path.exists() {
        tracing::warn!("no config at {}, using defaults", path.display());
        return Ok(AgentConfig::default());
    }
    AgentConfig::load(path)?.validated()
}

/// Re-reads `path` into `handle`.
pub fn reload(handle: &ConfigHandle, path: &Path) -> nb_core::Result<()> {
    handle.try_update(AgentConfig::load(path)?)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
