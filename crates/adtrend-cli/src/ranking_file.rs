//! The ranking file handed to downstream consumers.

use std::path::Path;

use adtrend_core::{DominantColor, RankedAd};
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RankingEntry {
    pub rank: usize,
    pub score: f64,
    pub ad_id: String,
    pub tags: Vec<String>,
    pub dominant_color: Option<DominantColor>,
}

impl From<&RankedAd> for RankingEntry {
    fn from(ranked: &RankedAd) -> Self {
        let ad = ranked.ad();
        Self {
            rank: ranked.rank(),
            score: ranked.score(),
            ad_id: ad.ad_id.clone(),
            tags: ad.tags.clone(),
            dominant_color: ad.analysis.map(|a| a.dominant_color),
        }
    }
}

/// Write `ranked` as a pretty-printed JSON array, creating parent
/// directories as needed.
pub(crate) fn write_ranking(path: &Path, ranked: &[RankedAd]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let entries: Vec<RankingEntry> = ranked.iter().map(RankingEntry::from).collect();
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write ranking file {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "wrote ranking file");
    Ok(())
}
