//! Reports returned to the host page

use serde::Serialize;
use std::collections::BTreeMap;

/// Snapshot of the filter after initialization or a sync pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total_items: usize,
    pub unique_letters: usize,
    pub visible_items: usize,
    pub letter_distribution: BTreeMap<char, usize>,
    /// Average sync duration in milliseconds, if any sync ran
    pub average_sync_ms: Option<f32>,
}

/// Outcome of one recomputation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Letters with at least one visible item, ascending
    pub visible_letters: Vec<char>,
    /// Dense rank assigned to each visible letter
    pub group_ranks: BTreeMap<char, u32>,
    pub visible_items: usize,
    pub column_count: u32,
}
