// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use clap::CommandFactory;
use yare::parameterized;

#[test]
fn command_definition_is_consistent() {
    Args::command().debug_assert();
}

#[test]
fn defaults_run_the_loop() {
    let args = Args::try_parse_from(["nbsyncd"]).unwrap();
    assert_eq!(args.config, None);
    assert_eq!(args.log_file, None);
    assert!(!args.once && !args.check && !args.init);
}

#[test]
fn paths_are_parsed() {
    let args = Args::try_parse_from([
        "nbsyncd",
        "--config",
        "/etc/nbsync.toml",
        "--log-file",
        "/var/log/nbsyncd.log",
        "--once",
    ])
    .unwrap();
    assert_eq!(args.config, Some(PathBuf::from("/etc/nbsync.toml")));
    assert_eq!(args.log_file, Some(PathBuf::from("/var/log/nbsyncd.log")));
    assert!(args.once);
}

#[parameterized(
    once_and_check = { &["nbsyncd", "--once", "--check"] },
    once_and_init = { &["nbsyncd", "--once", "--init"] },
    check_and_init = { &["nbsyncd", "--check", "--init"] },
)]
fn modes_are_exclusive(argv: &[&str]) {
    assert!(Args::try_parse_from(argv).is_err());
}
