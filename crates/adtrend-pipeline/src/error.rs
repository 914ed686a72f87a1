use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sidecar metadata {}: {reason}", .path.display())]
    Sidecar { path: PathBuf, reason: String },

    #[error("no image registered for {}", .0.display())]
    NotFound(PathBuf),
}

#[derive(Debug, Error)]
#[error("person detector failed: {0}")]
pub struct DetectError(pub String);

/// Why an ad could not be analysed. Always recoverable: the ad passes on
/// without analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("ad has no image path")]
    NoImage,

    #[error(transparent)]
    Image(#[from] ImageSourceError),

    #[error(transparent)]
    Detector(#[from] DetectError),
}
