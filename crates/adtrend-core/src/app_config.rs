use std::fmt;
use std::path::PathBuf;

/// Which decoder backs the `ImageSource` capability for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageBackend {
    /// Pure-Rust decoding of the raster file.
    #[default]
    Decoder,
    /// `<image>.meta` JSON sidecar files describing colour and size.
    Sidecar,
}

impl fmt::Display for ImageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageBackend::Decoder => write!(f, "decoder"),
            ImageBackend::Sidecar => write!(f, "sidecar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonDetectorKind {
    /// Never reports a person.
    None,
    /// Whole-frame luminance heuristic.
    #[default]
    Brightness,
}

impl fmt::Display for PersonDetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonDetectorKind::None => write!(f, "none"),
            PersonDetectorKind::Brightness => write!(f, "brightness"),
        }
    }
}

/// How ranked ads are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// Per-tag trend against historical frequencies.
    #[default]
    Trend,
    /// Static weighted sum over analysis attributes.
    Weighted,
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::Trend => write!(f, "trend"),
            ScoringPolicy::Weighted => write!(f, "weighted"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub image_backend: ImageBackend,
    pub person_detector: PersonDetectorKind,
    pub phash_threshold: u32,
    pub scoring_policy: ScoringPolicy,
    pub ranking_output: PathBuf,
    pub history_path: Option<PathBuf>,
}
