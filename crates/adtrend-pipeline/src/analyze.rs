//! Image analysis stage: colour, person presence, layout and pitch.

use std::sync::LazyLock;

use adtrend_core::{Ad, ImageAnalysis, LayoutType, Pitch};
use image::{imageops, GrayImage};
use imageproc::edges::canny;
use regex::Regex;

use crate::color::dominant_color;
use crate::detector::PersonDetector;
use crate::error::AnalyzeError;
use crate::image_source::ImageSource;

/// Edge density above which a creative is text-heavy.
pub const TEXT_HEAVY_DENSITY: f64 = 0.25;
/// Edge density above which a creative is balanced.
pub const BALANCED_DENSITY: f64 = 0.15;

const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;

const RATIONAL_KEYWORDS: &[&str] = &[
    "save",
    "price",
    "discount",
    "offer",
    "plan",
    "guarantee",
    "deal",
    "savings",
];

const EMOTIONAL_KEYWORDS: &[&str] = &[
    "love", "feel", "happy", "inspire", "dream", "story", "joy", "family",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9']+").expect("valid word regex"));

/// Attach an [`ImageAnalysis`] to every ad whose image can be analysed.
///
/// Ads that cannot be analysed pass through unchanged; this never fails the
/// batch.
pub fn analyze_ads(
    ads: Vec<Ad>,
    source: &dyn ImageSource,
    detector: &dyn PersonDetector,
) -> Vec<Ad> {
    let mut analysed = 0usize;
    let out: Vec<Ad> = ads
        .into_iter()
        .map(|ad| match analyze_ad(&ad, source, detector) {
            Ok(analysis) => {
                tracing::debug!(
                    ad_id = %ad.ad_id,
                    color = %analysis.dominant_color,
                    layout = %analysis.layout_type,
                    pitch = %analysis.pitch,
                    has_person = analysis.has_person,
                    "analysed image"
                );
                analysed += 1;
                ad.with_analysis(analysis)
            }
            Err(e) => {
                tracing::debug!(ad_id = %ad.ad_id, error = %e, "image analysis unavailable");
                ad
            }
        })
        .collect();

    tracing::info!(analysed, skipped = out.len() - analysed, "analysed images");
    out
}

/// Analyse one ad's creative.
///
/// # Errors
///
/// Returns [`AnalyzeError`] if the ad has no image, the image cannot be
/// loaded, or the person detector fails.
pub fn analyze_ad(
    ad: &Ad,
    source: &dyn ImageSource,
    detector: &dyn PersonDetector,
) -> Result<ImageAnalysis, AnalyzeError> {
    let path = ad.image_path.as_deref().ok_or(AnalyzeError::NoImage)?;
    let image = source.load(path)?;
    let gray = imageops::grayscale(&image);

    let dominant_color = dominant_color(&image);
    let has_person = !detector.detect(&gray)?.is_empty();
    let layout_type = classify_layout(edge_density(&gray));

    let text = format!(
        "{} {}",
        ad.creative_body,
        ad.ocr_text.as_deref().unwrap_or_default()
    );
    let pitch = classify_pitch(&text, layout_type, has_person);

    Ok(ImageAnalysis {
        dominant_color,
        has_person,
        layout_type,
        pitch,
    })
}

/// Fraction of pixels that Canny marks as edges, in `[0, 1]`.
#[must_use]
pub fn edge_density(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let sum: u64 = edges.pixels().map(|p| u64::from(p.0[0])).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / (f64::from(width) * f64::from(height));
    mean / 255.0
}

#[must_use]
pub fn classify_layout(density: f64) -> LayoutType {
    if density > TEXT_HEAVY_DENSITY {
        LayoutType::TextHeavy
    } else if density > BALANCED_DENSITY {
        LayoutType::Balanced
    } else {
        LayoutType::Visual
    }
}

/// Rational versus emotional keyword count over the lowercased ad text.
///
/// A tie falls back to `Emotional` for person-led visual creatives and
/// `Balanced` otherwise.
#[must_use]
pub fn classify_pitch(text: &str, layout: LayoutType, has_person: bool) -> Pitch {
    let lowered = text.to_lowercase();
    let (mut rational, mut emotional) = (0usize, 0usize);
    for word in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
        if RATIONAL_KEYWORDS.contains(&word) {
            rational += 1;
        } else if EMOTIONAL_KEYWORDS.contains(&word) {
            emotional += 1;
        }
    }

    match rational.cmp(&emotional) {
        std::cmp::Ordering::Greater => Pitch::Rational,
        std::cmp::Ordering::Less => Pitch::Emotional,
        std::cmp::Ordering::Equal if layout == LayoutType::Visual && has_person => {
            Pitch::Emotional
        }
        std::cmp::Ordering::Equal => Pitch::Balanced,
    }
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
