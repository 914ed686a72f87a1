//! Batch and history file loading.

use std::path::Path;

use adtrend_core::{Ad, TrendHistory};
use anyhow::Context;

/// Read a JSON array of ad records.
pub(crate) fn load_ads(path: &Path) -> anyhow::Result<Vec<Ad>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ads file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse ads file {}", path.display()))
}

/// Read tag history; `.yaml`/`.yml` files are parsed as YAML, anything else
/// as JSON. No path means no history, so every tag scores from zero.
pub(crate) fn load_history(path: Option<&Path>) -> anyhow::Result<TrendHistory> {
    let Some(path) = path else {
        return Ok(TrendHistory::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let history = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse history file {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse history file {}", path.display()))?
    };
    Ok(history)
}
