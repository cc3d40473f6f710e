// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by the daemon.
//!
//! Names are generated by `build.rs` into [`names`].

use std::path::PathBuf;

pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Returns the value of `NBSYNC_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(names::NBSYNC_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `XDG_CONFIG_HOME` if set.
pub fn xdg_config_home() -> Option<PathBuf> {
    std::env::var(names::XDG_CONFIG_HOME).ok().map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
