// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! nbsyncd - The neighbor sync daemon.
//!
//! Periodically reports the local node's neighbor traffic to the neighbor
//! directory and converges the node's neighbor list onto the directory's
//! answer through the node's admin API.
//!
//! Usage:
//!   nbsyncd [--config <path>] [--log-file <path>] [--once | --check | --init]

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use nb_core::{AgentConfig, ClockSource, SystemClock};
use tokio_util::sync::CancellationToken;

mod cli;
mod directory;
mod env;
mod error;
mod host;
mod http;
mod runner;
mod settings;
mod signals;
#[cfg(test)]
mod test_helpers;

use cli::Args;
use directory::HttpDirectory;
use error::Result;
use host::AdminApiHost;
use runner::{CycleOutcome, Reconciler};
use settings::ConfigHandle;

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.log_file.as_deref());

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let path = settings::resolve_config_path(args.config);
    if args.init {
        return init_config(&path);
    }
    if args.check {
        return Ok(check_config(&path));
    }

    let config = settings::load_startup_config(&path)?;
    tracing::info!("nbsyncd starting, config={}", path.display());

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run_async(config, &path, args.once))
}

async fn run_async(config: AgentConfig, path: &Path, once: bool) -> Result<ExitCode> {
    let handle = ConfigHandle::new(config);
    let client = http::build_client()?;
    let mut reconciler = Reconciler::new(
        handle.clone(),
        HttpDirectory::new(client.clone()),
        AdminApiHost::new(client),
    );

    if once {
        return match reconciler.run_cycle(SystemClock.now_ms()).await {
            CycleOutcome::Failed(err) => Err(err.into()),
            CycleOutcome::Skipped | CycleOutcome::Synced(_) => Ok(ExitCode::SUCCESS),
        };
    }

    let stop = CancellationToken::new();
    let signal_task = signals::spawn(handle, path.to_path_buf(), stop.clone())?;
    reconciler.run(stop.clone()).await;

    stop.cancel();
    if let Err(e) = signal_task.await {
        tracing::warn!("signal task failed: {}", e);
    }
    tracing::info!("nbsyncd stopped");
    Ok(ExitCode::SUCCESS)
}

fn check_config(path: &Path) -> ExitCode {
    if !path.exists() {
        println!("{}: not found", path.display());
        return ExitCode::FAILURE;
    }
    let config = match AgentConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            println!("{}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let violations = config.validate();
    if violations.is_empty() {
        println!("{}: ok", path.display());
        return ExitCode::SUCCESS;
    }
    for violation in &violations {
        println!("{}: {}", path.display(), violation);
    }
    ExitCode::FAILURE
}

fn init_config(path: &Path) -> Result<ExitCode> {
    if path.exists() {
        println!("{} already exists", path.display());
        return Ok(ExitCode::FAILURE);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    AgentConfig::default().save(path)?;
    println!("wrote default configuration to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(log_path: Option<&Path>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Fall back to stderr when no file is given or it cannot be opened
    let file = log_path.and_then(|p| fs::OpenOptions::new().create(true).append(true).open(p).ok());
    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
