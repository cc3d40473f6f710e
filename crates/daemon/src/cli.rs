// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Parser;

/// Keeps a node's neighbor list in line with the neighbor directory.
#[derive(Parser, Debug)]
#[command(name = "nbsyncd", version, about)]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/nbsync/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Run a single sync cycle and exit with its outcome
    #[arg(long, conflicts_with_all = ["check", "init"])]
    pub once: bool,

    /// Validate the config file, print any violations and exit
    #[arg(long, conflicts_with = "init")]
    pub check: bool,

    /// Write a config file with default values and exit
    #[arg(long)]
    pub init: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
