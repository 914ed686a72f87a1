//! History-aware trend scoring over batch tag frequencies.

use std::collections::HashMap;

use adtrend_core::{Ad, RankedAd, TrendHistory, TrendMetrics};

use crate::ranking::assign_ranks;

/// Occurrences of each tag across the batch.
#[must_use]
pub fn tag_frequencies(ads: &[Ad]) -> HashMap<&str, u32> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for tag in ads.iter().flat_map(|ad| ad.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Growth rate against yesterday plus moving-average persistence.
///
/// Both denominators are offset by one, so a tag without history scores
/// exactly `freq_today`.
#[must_use]
pub fn trend_score(freq_today: u32, history: &TrendMetrics) -> f64 {
    let yesterday = f64::from(history.freq_yesterday);
    let rate = (f64::from(freq_today) - yesterday) / (yesterday + 1.0);
    let persistence = history.ma3_today / (history.ma3_yesterday + 1.0);
    rate + persistence
}

/// Trend score for every tag present in the batch.
#[must_use]
pub fn tag_trend_scores(ads: &[Ad], history: &TrendHistory) -> HashMap<String, f64> {
    let empty = TrendMetrics::default();
    tag_frequencies(ads)
        .into_iter()
        .map(|(tag, freq)| {
            let metrics = history.get(tag).unwrap_or(&empty);
            (tag.to_string(), trend_score(freq, metrics))
        })
        .collect()
}

/// Score each ad by its best-trending tag (floor `0.0`) and rank them.
#[must_use]
pub fn rank_by_trend(ads: Vec<Ad>, history: &TrendHistory) -> Vec<RankedAd> {
    let scores = tag_trend_scores(&ads, history);
    let scored = ads
        .into_iter()
        .map(|ad| {
            let score = ad
                .tags
                .iter()
                .filter_map(|tag| scores.get(tag))
                .fold(0.0_f64, |best, &s| best.max(s));
            (ad, score)
        })
        .collect();
    assign_ranks(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: &str, tags: &[&str]) -> Ad {
        Ad::new(id, "body").with_tags(tags.iter().map(|t| (*t).to_string()).collect())
    }

    #[test]
    fn new_tag_scores_its_frequency() {
        assert!((trend_score(3, &TrendMetrics::default()) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn score_blends_rate_and_persistence() {
        let metrics = TrendMetrics {
            freq_yesterday: 1,
            ma3_today: 3.0,
            ma3_yesterday: 2.0,
            ..TrendMetrics::default()
        };
        // rate = (5 - 1) / 2 = 2, persistence = 3 / 3 = 1
        assert!((trend_score(5, &metrics) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn declining_tag_scores_negative() {
        let metrics = TrendMetrics {
            freq_yesterday: 9,
            ..TrendMetrics::default()
        };
        assert!(trend_score(1, &metrics) < 0.0);
    }

    #[test]
    fn shared_tag_without_history_scores_frequency() {
        let ads = vec![tagged("a1", &["promo"]), tagged("a2", &["promo"])];
        let ranked = rank_by_trend(ads, &TrendHistory::new());
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| (r.score() - 2.0).abs() < 1e-12));
        assert_eq!(ranked[0].ad().ad_id, "a1");
        assert_eq!(ranked[0].rank(), 1);
        assert_eq!(ranked[1].ad().ad_id, "a2");
        assert_eq!(ranked[1].rank(), 2);
    }

    #[test]
    fn ad_score_is_max_over_its_tags() {
        let ads = vec![
            tagged("a1", &["rare"]),
            tagged("a2", &["common", "rare"]),
            tagged("a3", &["common"]),
            tagged("a4", &["common"]),
        ];
        let ranked = rank_by_trend(ads, &TrendHistory::new());
        let ids: Vec<&str> = ranked.iter().map(|r| r.ad().ad_id.as_str()).collect();
        // common = 3, rare = 2; a2..a4 tie at 3 and keep input order.
        assert_eq!(ids, vec!["a2", "a3", "a4", "a1"]);
        assert!((ranked[3].score() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn untagged_and_declining_ads_floor_at_zero() {
        let mut history = TrendHistory::new();
        history.insert(
            "fading".to_string(),
            TrendMetrics {
                freq_yesterday: 10,
                ..TrendMetrics::default()
            },
        );
        let ads = vec![tagged("a1", &[]), tagged("a2", &["fading"])];
        let ranked = rank_by_trend(ads, &history);
        assert!(ranked.iter().all(|r| r.score().abs() < f64::EPSILON));
        assert_eq!(ranked[0].ad().ad_id, "a1");
    }

    #[test]
    fn history_lifts_persistent_tag() {
        let mut history = TrendHistory::new();
        history.insert(
            "steady".to_string(),
            TrendMetrics {
                ma3_today: 8.0,
                ma3_yesterday: 1.0,
                ..TrendMetrics::default()
            },
        );
        let ads = vec![tagged("a1", &["fresh"]), tagged("a2", &["steady"])];
        let ranked = rank_by_trend(ads, &history);
        assert_eq!(ranked[0].ad().ad_id, "a2");
        assert!((ranked[0].score() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_is_idempotent() {
        let ads = vec![
            tagged("a1", &["x", "y"]),
            tagged("a2", &["y"]),
            tagged("a3", &["z"]),
        ];
        let first = rank_by_trend(ads.clone(), &TrendHistory::new());
        let second = rank_by_trend(ads, &TrendHistory::new());
        assert_eq!(first, second);
        let ranks: Vec<usize> = first.iter().map(RankedAd::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
