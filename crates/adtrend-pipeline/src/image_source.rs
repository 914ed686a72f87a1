//! Pluggable access to creative image pixels.
//!
//! The backend is chosen once at startup from configuration
//! ([`image_source_for`]); stages only see `&dyn ImageSource`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use adtrend_core::ImageBackend;
use image::{Rgb, RgbImage};
use serde::Deserialize;

use crate::error::ImageSourceError;

/// Read access to raster images by path.
pub trait ImageSource: Send + Sync {
    /// Decode the image at `path` into 8-bit RGB.
    ///
    /// # Errors
    ///
    /// Returns [`ImageSourceError`] if the image cannot be read or decoded.
    fn load(&self, path: &Path) -> Result<RgbImage, ImageSourceError>;
}

/// Build the image source selected by configuration.
#[must_use]
pub fn image_source_for(backend: ImageBackend) -> Box<dyn ImageSource> {
    match backend {
        ImageBackend::Decoder => Box::new(DecoderImageSource),
        ImageBackend::Sidecar => Box::new(SidecarImageSource),
    }
}

/// Decodes image files with the pure-Rust `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderImageSource;

impl ImageSource for DecoderImageSource {
    fn load(&self, path: &Path) -> Result<RgbImage, ImageSourceError> {
        image::open(path)
            .map(|img| img.to_rgb8())
            .map_err(|source| ImageSourceError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Largest frame the sidecar backend will synthesise.
const MAX_SIDECAR_PIXELS: u64 = 4096 * 4096;

#[derive(Debug, Deserialize)]
struct SidecarMeta {
    #[serde(default = "default_sidecar_color")]
    color: String,
    #[serde(default = "default_sidecar_side")]
    width: u32,
    #[serde(default = "default_sidecar_side")]
    height: u32,
}

fn default_sidecar_color() -> String {
    "gray".to_string()
}

fn default_sidecar_side() -> u32 {
    1
}

/// Reads `<image path>.meta` JSON files (`{"color", "width", "height"}`)
/// written next to images whose pixels are not available locally, and
/// renders them as a solid frame of the described colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarImageSource;

impl SidecarImageSource {
    /// `banner.png` → `banner.png.meta`.
    #[must_use]
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let mut raw: OsString = path.as_os_str().to_owned();
        raw.push(".meta");
        PathBuf::from(raw)
    }

    fn read_meta(path: &Path) -> Result<SidecarMeta, ImageSourceError> {
        let meta_path = Self::sidecar_path(path);
        let raw = std::fs::read_to_string(&meta_path).map_err(|source| ImageSourceError::Io {
            path: meta_path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|e| ImageSourceError::Sidecar {
            path: meta_path,
            reason: e.to_string(),
        })
    }

    fn fill_color(name: &str) -> Rgb<u8> {
        match name {
            "red" => Rgb([220, 40, 40]),
            "green" => Rgb([40, 170, 80]),
            "blue" => Rgb([40, 90, 200]),
            _ => Rgb([180, 180, 180]),
        }
    }
}

impl ImageSource for SidecarImageSource {
    fn load(&self, path: &Path) -> Result<RgbImage, ImageSourceError> {
        let meta = Self::read_meta(path)?;
        let pixels = u64::from(meta.width) * u64::from(meta.height);
        if pixels == 0 || pixels > MAX_SIDECAR_PIXELS {
            return Err(ImageSourceError::Sidecar {
                path: Self::sidecar_path(path),
                reason: format!("unsupported frame size {}x{}", meta.width, meta.height),
            });
        }
        Ok(RgbImage::from_pixel(
            meta.width,
            meta.height,
            Self::fill_color(&meta.color),
        ))
    }
}

/// In-memory images keyed by path, for fixtures and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSource {
    images: HashMap<PathBuf, RgbImage>,
}

impl MemoryImageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbImage) {
        self.images.insert(path.into(), image);
    }

    #[must_use]
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: RgbImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, path: &Path) -> Result<RgbImage, ImageSourceError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ImageSourceError::NotFound(path.to_path_buf()))
    }
}
