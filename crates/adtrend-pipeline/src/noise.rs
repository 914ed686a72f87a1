//! Structural validity filter: the first pipeline stage.

use adtrend_core::Ad;

use crate::image_source::ImageSource;
use crate::types::StageOutcome;

/// Longest side over shortest side beyond which a creative is rejected.
pub const MAX_ASPECT_RATIO: f64 = 10.0;

/// Upper bound on stripped OCR text length, in characters.
pub const MAX_OCR_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    MissingId,
    EmptyText,
    InvalidImage,
    OcrText,
}

impl DropReason {
    fn as_str(self) -> &'static str {
        match self {
            DropReason::MissingId => "missing ad_id",
            DropReason::EmptyText => "empty text fields",
            DropReason::InvalidImage => "invalid image",
            DropReason::OcrText => "ocr text absent or out of bounds",
        }
    }
}

/// Drop ads that fail structural checks, preserving survivor order.
///
/// Checks run in precedence order: empty `ad_id`; both `creative_body` and
/// stripped `ocr_text` empty; missing, undecodable or extreme-aspect image;
/// OCR text absent, blank, or longer than [`MAX_OCR_CHARS`]. The image is
/// fully decoded, so survivors always carry a readable creative.
pub fn filter_noise(ads: Vec<Ad>, source: &dyn ImageSource) -> StageOutcome {
    let mut kept = Vec::with_capacity(ads.len());
    let mut dropped = 0usize;

    for ad in ads {
        match drop_reason(&ad, source) {
            Some(reason) => {
                tracing::debug!(ad_id = %ad.ad_id, reason = reason.as_str(), "dropping noisy ad");
                dropped += 1;
            }
            None => kept.push(ad),
        }
    }

    tracing::info!(kept = kept.len(), dropped, "filtered noise");
    StageOutcome { kept, dropped }
}

fn drop_reason(ad: &Ad, source: &dyn ImageSource) -> Option<DropReason> {
    if ad.ad_id.is_empty() {
        return Some(DropReason::MissingId);
    }
    if ad.creative_body.is_empty() && ad.ocr_text_trimmed().is_empty() {
        return Some(DropReason::EmptyText);
    }
    if !has_valid_image(ad, source) {
        return Some(DropReason::InvalidImage);
    }
    if !has_enough_ocr_text(ad) {
        return Some(DropReason::OcrText);
    }
    None
}

fn has_valid_image(ad: &Ad, source: &dyn ImageSource) -> bool {
    let Some(path) = ad.image_path.as_deref() else {
        return false;
    };
    match source.load(path) {
        Ok(image) => {
            let (width, height) = image.dimensions();
            aspect_ratio_ok(width, height)
        }
        Err(e) => {
            tracing::debug!(ad_id = %ad.ad_id, error = %e, "image unreadable");
            false
        }
    }
}

fn aspect_ratio_ok(width: u32, height: u32) -> bool {
    let short = width.min(height);
    if short == 0 {
        return false;
    }
    let ratio = f64::from(width.max(height)) / f64::from(short);
    ratio <= MAX_ASPECT_RATIO
}

fn has_enough_ocr_text(ad: &Ad) -> bool {
    let Some(text) = ad.ocr_text.as_deref() else {
        return false;
    };
    let len = text.trim().chars().count();
    (1..=MAX_OCR_CHARS).contains(&len)
}

#[cfg(test)]
#[path = "noise_test.rs"]
mod tests;
