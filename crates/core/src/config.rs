// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration.
//!
//! Configuration is read from a TOML file and treated as an immutable
//! snapshot: the daemon swaps in a whole new [`AgentConfig`] after it passes
//! [`AgentConfig::validate`], never individual fields.
//!
//! ```toml
//! admin_port = 2187
//! admin_password = "a long secret"
//! directory_secret = "abcd1234"
//! operator_id = "123456789012345678"
//! node_address = "example.org:1337"
//! static_neighbors = "friend.org:1337, other.net:14265"
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::backoff::BackoffPolicy;
use crate::error::{Error, Result};

/// Admin password shipped in the node's sample config.
pub const DEFAULT_ADMIN_PASSWORD: &str = "change_me_now";
/// Placeholder node address used until the operator configures one.
pub const DEFAULT_NODE_ADDRESS: &str = "localhost:1337";
/// Public neighbor directory.
pub const DEFAULT_DIRECTORY_URL: &str = "https://qubiota.com/ictinder/api.php";

static OPERATOR_ID_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[0-9]{14,22}$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static NODE_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[a-zA-Z.\-_0-9]+:\d{1,5}$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Address prefixes other nodes cannot reach.
const UNREACHABLE_PREFIXES: [&str; 4] = ["localhost:", "127.", "0.0.0.0:", "192.168."];

/// Agent configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Port of the node's local admin API.
    pub admin_port: u32,
    /// Password of the node's local admin API.
    pub admin_password: String,
    /// Shared secret registered with the directory for `operator_id`.
    pub directory_secret: String,
    /// Operator identity known to the directory.
    pub operator_id: String,
    /// This node's `host:port` as reachable by other nodes.
    pub node_address: String,
    /// Comma-separated neighbors that reconciliation never removes.
    pub static_neighbors: String,
    /// Directory endpoint receiving the sync report.
    pub directory_url: String,
    /// Base interval between sync cycles (seconds).
    pub sync_interval_secs: u64,
    /// Backoff multiplier applied after a failed cycle.
    pub backoff_growth: f64,
    /// Upper bound of the backoff multiplier.
    pub backoff_max: f64,
    /// Timeout for each HTTP request (seconds).
    pub request_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            admin_port: 2187,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            directory_secret: String::new(),
            operator_id: String::new(),
            node_address: DEFAULT_NODE_ADDRESS.to_string(),
            static_neighbors: String::new(),
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            sync_interval_secs: 180,
            backoff_growth: 1.4,
            backoff_max: 8.0,
            request_timeout_secs: 30,
        }
    }
}

/// A single configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub reason: String,
}

impl Violation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Violation { field, reason: reason.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid property '{}': {}", self.field, self.reason)
    }
}

impl AgentConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Saves configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks every field and returns all violations found.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.admin_port > 65535 {
            violations.push(Violation::new("admin_port", "not in interval [0,65535]"));
        }

        if self.admin_password.chars().count() < 8 {
            violations.push(Violation::new("admin_password", "too short, not secure"));
        }
        if self.admin_password == DEFAULT_ADMIN_PASSWORD {
            violations.push(Violation::new(
                "admin_password",
                "still the shipped default, set the node's admin password",
            ));
        }

        if !OPERATOR_ID_RE.is_match(&self.operator_id) {
            violations.push(Violation::new("operator_id", "must be 14 to 22 digits"));
        }

        if !NODE_ADDRESS_RE.is_match(&self.node_address) {
            violations.push(Violation::new("node_address", "not matching expected format 'HOST:PORT'"));
        } else if UNREACHABLE_PREFIXES.iter().any(|p| self.node_address.starts_with(p)) {
            violations.push(Violation::new(
                "node_address",
                "specify a host that can be addressed by other nodes",
            ));
        }

        if !(self.directory_url.starts_with("http://") || self.directory_url.starts_with("https://"))
        {
            violations.push(Violation::new("directory_url", "must be an http:// or https:// URL"));
        }

        if self.sync_interval_secs == 0 {
            violations.push(Violation::new("sync_interval_secs", "must be greater than 0"));
        }
        if !self.backoff_growth.is_finite() || self.backoff_growth <= 1.0 {
            violations.push(Violation::new(
                "backoff_growth",
                "must be a finite number greater than 1",
            ));
        }
        if !self.backoff_max.is_finite() || self.backoff_max < 1.0 {
            violations.push(Violation::new(
                "backoff_max",
                "must be a finite number of at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            violations.push(Violation::new("request_timeout_secs", "must be greater than 0"));
        }

        violations
    }

    /// Consumes the config if it is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] with every violation otherwise.
    pub fn validated(self) -> Result<Self> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(self)
        } else {
            Err(Error::InvalidConfig(violations))
        }
    }

    /// Pinned neighbor addresses, with whitespace and empty entries removed.
    pub fn pinned_neighbors(&self) -> BTreeSet<String> {
        self.static_neighbors
            .split(',')
            .map(|entry| entry.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Returns true while the node address is still a loopback placeholder.
    ///
    /// Syncing in that state would register an address no peer can reach.
    pub fn is_placeholder_address(&self) -> bool {
        self.node_address.starts_with("localhost") || self.node_address.starts_with("127.")
    }

    /// Base interval between cycles.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff growth and cap.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy { growth: self.backoff_growth, max_factor: self.backoff_max }
    }

    /// Base URL of the node's local admin API.
    pub fn admin_base_url(&self) -> String {
        format!("http://localhost:{}", self.admin_port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
