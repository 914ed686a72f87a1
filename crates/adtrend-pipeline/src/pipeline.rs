//! Composition of the five stages over one batch.

use std::collections::HashSet;

use adtrend_core::{Ad, AppConfig, RankedAd, ScoringPolicy, TrendHistory, MAX_PHASH_THRESHOLD};

use crate::analyze::analyze_ads;
use crate::dedupe::{dedupe_ads, DEFAULT_PHASH_THRESHOLD};
use crate::detector::{detector_for, PersonDetector};
use crate::error::PipelineError;
use crate::image_source::{image_source_for, ImageSource};
use crate::noise::filter_noise;
use crate::ranking::rank_ads;
use crate::tags::generate_tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub phash_threshold: u32,
    pub scoring_policy: ScoringPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            phash_threshold: DEFAULT_PHASH_THRESHOLD,
            scoring_policy: ScoringPolicy::Trend,
        }
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            phash_threshold: config.phash_threshold,
            scoring_policy: config.scoring_policy,
        }
    }
}

/// Per-stage attrition for one run.
///
/// `input == noise_dropped + duplicates_dropped + ranked`. `unanalyzed`
/// counts ranked ads that passed through without image analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunnelCounts {
    pub input: usize,
    pub noise_dropped: usize,
    pub duplicates_dropped: usize,
    pub unanalyzed: usize,
    pub ranked: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Final ordering, rank 1 first.
    pub ranked: Vec<RankedAd>,
    /// Analysed and tagged survivors in pre-ranking order, for persistence.
    pub processed: Vec<Ad>,
    pub funnel: FunnelCounts,
}

/// The processing pipeline with its injected image and detector capabilities.
pub struct Pipeline {
    source: Box<dyn ImageSource>,
    detector: Box<dyn PersonDetector>,
    settings: PipelineSettings,
}

impl Pipeline {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidArgument`] if the phash threshold exceeds 64.
    pub fn new(
        source: Box<dyn ImageSource>,
        detector: Box<dyn PersonDetector>,
        settings: PipelineSettings,
    ) -> Result<Self, PipelineError> {
        if settings.phash_threshold > MAX_PHASH_THRESHOLD {
            return Err(PipelineError::InvalidArgument(format!(
                "phash_threshold must be at most {MAX_PHASH_THRESHOLD}, got {}",
                settings.phash_threshold
            )));
        }
        Ok(Self {
            source,
            detector,
            settings,
        })
    }

    /// Build a pipeline with the backends named in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidArgument`] if the configured threshold is out of range.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Self::new(
            image_source_for(config.image_backend),
            detector_for(config.person_detector),
            PipelineSettings::from(config),
        )
    }

    #[must_use]
    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Run noise filtering, deduplication, analysis, tagging and ranking.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidArgument`] if two ads share a non-empty
    /// `ad_id`.
    pub fn run(
        &self,
        ads: Vec<Ad>,
        history: &TrendHistory,
    ) -> Result<PipelineReport, PipelineError> {
        ensure_unique_ids(&ads)?;
        let input = ads.len();

        let filtered = filter_noise(ads, self.source.as_ref());
        let deduped = dedupe_ads(
            filtered.kept,
            self.source.as_ref(),
            self.settings.phash_threshold,
        )?;
        let analysed = analyze_ads(deduped.kept, self.source.as_ref(), self.detector.as_ref());
        let tagged = generate_tags(analysed);

        let unanalyzed = tagged.iter().filter(|ad| ad.analysis.is_none()).count();
        let processed = tagged.clone();
        let ranked = rank_ads(tagged, self.settings.scoring_policy, history);

        let funnel = FunnelCounts {
            input,
            noise_dropped: filtered.dropped,
            duplicates_dropped: deduped.dropped,
            unanalyzed,
            ranked: ranked.len(),
        };
        tracing::info!(
            input = funnel.input,
            noise_dropped = funnel.noise_dropped,
            duplicates_dropped = funnel.duplicates_dropped,
            unanalyzed = funnel.unanalyzed,
            ranked = funnel.ranked,
            "pipeline completed"
        );

        Ok(PipelineReport {
            ranked,
            processed,
            funnel,
        })
    }
}

fn ensure_unique_ids(ads: &[Ad]) -> Result<(), PipelineError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for ad in ads.iter().filter(|ad| !ad.ad_id.is_empty()) {
        if !seen.insert(ad.ad_id.as_str()) {
            return Err(PipelineError::InvalidArgument(format!(
                "duplicate ad_id '{}' in batch",
                ad.ad_id
            )));
        }
    }
    Ok(())
}
