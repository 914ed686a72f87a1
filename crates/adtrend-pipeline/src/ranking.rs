//! Final ordering of processed ads under the configured scoring policy.

use std::collections::HashMap;

use adtrend_core::{Ad, LayoutType, Pitch, RankedAd, ScoringPolicy, TrendHistory};

use crate::trend::rank_by_trend;

/// Score and rank ads under `policy`. `history` is only read by
/// [`ScoringPolicy::Trend`].
#[must_use]
pub fn rank_ads(ads: Vec<Ad>, policy: ScoringPolicy, history: &TrendHistory) -> Vec<RankedAd> {
    let ranked = match policy {
        ScoringPolicy::Trend => rank_by_trend(ads, history),
        ScoringPolicy::Weighted => assign_ranks(
            ads.into_iter()
                .map(|ad| {
                    let score = weighted_score(&ad);
                    (ad, score)
                })
                .collect(),
        ),
    };
    tracing::info!(ranked = ranked.len(), policy = %policy, "ranked ads");
    ranked
}

/// Static attribute score, rounded to three decimals.
#[must_use]
pub fn weighted_score(ad: &Ad) -> f64 {
    let mut score = 0.0;
    if let Some(analysis) = &ad.analysis {
        if analysis.has_person {
            score += 1.5;
        }
        score += match analysis.layout_type {
            LayoutType::Balanced => 1.0,
            LayoutType::Visual => 0.5,
            LayoutType::TextHeavy => 0.0,
        };
        score += match analysis.pitch {
            Pitch::Emotional => 1.2,
            Pitch::Rational => 1.0,
            Pitch::Balanced => 0.0,
        };
    }
    #[allow(clippy::cast_precision_loss)]
    let tag_bonus = ad.tags.len() as f64 * 0.2;
    score += tag_bonus;
    if ad
        .call_to_action
        .as_deref()
        .is_some_and(|cta| !cta.trim().is_empty())
    {
        score += 0.3;
    }
    (score * 1000.0).round() / 1000.0
}

/// Stable descending sort by score, then dense 1-based ranks.
pub(crate) fn assign_ranks(mut scored: Vec<(Ad, f64)>) -> Vec<RankedAd> {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (ad, score))| RankedAd::new(ad, score, idx + 1))
        .collect()
}

/// Tag occurrence counts across ranked ads, most frequent first, ties by tag.
#[must_use]
pub fn summarize_tagspace(ranked: &[RankedAd]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in ranked.iter().flat_map(|r| r.ad().tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    let mut summary: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    summary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    summary
}
