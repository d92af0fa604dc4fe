//! Presentation-time ordering over inherently unordered collections.
//!
//! This module is intentionally **pure logic**: no network, no store. The
//! discovered key set and the history rows carry no inherent order, so any
//! order shown to a caller is computed here, deterministically, rather than
//! relied upon from collection iteration order.

use crate::types::{DependencyEntity, DependencyId};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Sort discovered property keys with the selected dependency first and the
/// remainder lexicographic. Deterministic for a fixed input set.
pub fn sort_keys_first(selected: &DependencyId, keys: &HashSet<String>) -> Vec<String> {
    let mut ordered: Vec<String> = keys.iter().cloned().collect();
    ordered.sort_by(|a, b| {
        let a_selected = a == selected.as_str();
        let b_selected = b == selected.as_str();
        // selected key always wins; everything else alphabetical
        b_selected.cmp(&a_selected).then_with(|| a.cmp(b))
    });
    ordered
}

/// Sort history rows most-recent-first. Ties break by author then dependency
/// id so a fixed input set always sorts identically.
pub fn sort_history_descending(mut rows: Vec<DependencyEntity>) -> Vec<DependencyEntity> {
    rows.sort_by(|a, b| match b.timestamp_millis.cmp(&a.timestamp_millis) {
        Ordering::Equal => a
            .authored_by
            .cmp(&b.authored_by)
            .then_with(|| a.dependency_id.cmp(&b.dependency_id)),
        other => other,
    });
    rows
}
