//! Historical per-tag frequency metrics supplied by an external store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Read-only history keyed by tag.
pub type TrendHistory = HashMap<String, TrendMetrics>;

/// Occurrence counts and 3-period moving averages for one tag.
///
/// Missing fields deserialize to zero, so a tag absent from history behaves
/// exactly like `TrendMetrics::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendMetrics {
    pub freq_today: u32,
    pub freq_yesterday: u32,
    pub ma3_today: f64,
    pub ma3_yesterday: f64,
    pub impr_today: Option<u64>,
    pub impr_yesterday: Option<u64>,
}
