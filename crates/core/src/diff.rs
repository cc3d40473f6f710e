// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation diff between the directory's neighbor list and ours.

use std::collections::BTreeSet;

/// The set of commands that brings the local neighbor list in line with the
/// directory.
///
/// `to_add` and `to_remove` are disjoint, and `to_remove` never contains a
/// pinned address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// Authoritative addresses missing locally.
    pub to_add: BTreeSet<String>,
    /// Local, non-pinned addresses the directory no longer lists.
    pub to_remove: BTreeSet<String>,
}

impl ReconciliationPlan {
    /// Returns true if nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of commands in the plan.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// Computes the diff that turns `local` into `authoritative`, leaving pinned
/// addresses in place.
///
/// An empty `authoritative` set is trusted as-is: every non-pinned local
/// neighbor is scheduled for removal.
pub fn plan(
    authoritative: &BTreeSet<String>,
    local: &BTreeSet<String>,
    pinned: &BTreeSet<String>,
) -> ReconciliationPlan {
    let to_add = authoritative.difference(local).cloned().collect();
    let to_remove = local
        .difference(authoritative)
        .filter(|address| !pinned.contains(*address))
        .cloned()
        .collect();
    ReconciliationPlan { to_add, to_remove }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
