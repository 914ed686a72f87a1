pub mod ads;
pub mod analysis;
pub mod app_config;
pub mod config;
pub mod trend;

use thiserror::Error;

pub use ads::{Ad, RankedAd};
pub use analysis::{DominantColor, ImageAnalysis, LayoutType, Pitch};
pub use app_config::{AppConfig, ImageBackend, PersonDetectorKind, ScoringPolicy};
pub use config::{
    load_app_config, load_app_config_from_env, parse_scoring_policy, MAX_PHASH_THRESHOLD,
};
pub use trend::{TrendHistory, TrendMetrics};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
