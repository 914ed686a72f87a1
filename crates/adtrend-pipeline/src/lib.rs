//! Ad processing and ranking pipeline.
//!
//! Turns fetched advertisement records into a deduplicated, tagged and
//! trend-ranked ordering. Stages run strictly in order, each consuming the
//! previous stage's survivors:
//!
//! 1. [`filter_noise`] drops structurally invalid ads.
//! 2. [`dedupe_ads`] drops exact-text and perceptual-image duplicates.
//! 3. [`analyze_ads`] attaches an [`adtrend_core::ImageAnalysis`].
//! 4. [`generate_tags`] derives the sorted tag set.
//! 5. [`rank_ads`] scores against tag history and assigns dense ranks.
//!
//! [`Pipeline`] composes the stages and reports funnel attrition.

pub mod analyze;
pub mod color;
pub mod dedupe;
pub mod detector;
pub mod error;
pub mod image_source;
pub mod noise;
pub mod phash;
pub mod pipeline;
pub mod ranking;
pub mod tags;
pub mod trend;
pub mod types;

pub use analyze::{analyze_ad, analyze_ads};
pub use dedupe::{dedupe_ads, DEFAULT_PHASH_THRESHOLD};
pub use detector::{detector_for, BrightnessDetector, NoPersonDetector, PersonDetector};
pub use error::{AnalyzeError, DetectError, ImageSourceError, PipelineError};
pub use image_source::{
    image_source_for, DecoderImageSource, ImageSource, MemoryImageSource, SidecarImageSource,
};
pub use noise::filter_noise;
pub use phash::{hamming_distance, perceptual_hash};
pub use pipeline::{FunnelCounts, Pipeline, PipelineReport, PipelineSettings};
pub use ranking::{rank_ads, summarize_tagspace, weighted_score};
pub use tags::{generate_tags, tags_for};
pub use trend::{rank_by_trend, tag_trend_scores, trend_score};
pub use types::StageOutcome;
