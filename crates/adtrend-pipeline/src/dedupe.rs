//! Two-tier duplicate removal: exact normalized text, then perceptual image
//! similarity against already-kept ads.
//!
//! Keep decisions depend on everything kept before, so ads are processed
//! strictly in input order.

use std::collections::HashSet;

use adtrend_core::{Ad, MAX_PHASH_THRESHOLD};
use sha2::{Digest, Sha256};

use crate::error::PipelineError;
use crate::image_source::ImageSource;
use crate::phash::{hamming_distance, perceptual_hash};
use crate::types::StageOutcome;

/// Default maximum Hamming distance (of 64 bits) treated as a visual duplicate.
pub const DEFAULT_PHASH_THRESHOLD: u32 = 5;

/// Remove duplicate ads, keeping the first occurrence.
///
/// An ad whose normalized text digest was already kept is dropped without
/// touching its image. Otherwise its perceptual hash is compared with every
/// kept hash; a distance `<= phash_threshold` drops it. Ads whose image
/// cannot be hashed are never visual duplicates.
///
/// Survivors carry `text_hash` and, when computable, `phash`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidArgument`] if `phash_threshold` exceeds 64.
pub fn dedupe_ads(
    ads: Vec<Ad>,
    source: &dyn ImageSource,
    phash_threshold: u32,
) -> Result<StageOutcome, PipelineError> {
    if phash_threshold > MAX_PHASH_THRESHOLD {
        return Err(PipelineError::InvalidArgument(format!(
            "phash_threshold must be at most {MAX_PHASH_THRESHOLD}, got {phash_threshold}"
        )));
    }

    let mut seen_text: HashSet<String> = HashSet::new();
    let mut kept_hashes: Vec<u64> = Vec::new();
    let mut kept = Vec::with_capacity(ads.len());
    let mut dropped = 0usize;

    for ad in ads {
        let digest = text_hash(&ad);
        if seen_text.contains(&digest) {
            tracing::debug!(ad_id = %ad.ad_id, "dropping text duplicate");
            dropped += 1;
            continue;
        }

        let phash = image_hash(&ad, source);
        if let Some(hash) = phash {
            if is_visual_duplicate(hash, &kept_hashes, phash_threshold) {
                tracing::debug!(
                    ad_id = %ad.ad_id,
                    phash = %format!("{hash:016x}"),
                    "dropping visual duplicate"
                );
                dropped += 1;
                continue;
            }
            kept_hashes.push(hash);
        }

        seen_text.insert(digest.clone());
        kept.push(ad.with_text_hash(digest).with_phash(phash));
    }

    tracing::info!(kept = kept.len(), dropped, "deduplicated ads");
    Ok(StageOutcome { kept, dropped })
}

/// Body and OCR text joined, lowercased, with whitespace runs collapsed.
#[must_use]
pub fn normalized_text(ad: &Ad) -> String {
    let joined = format!(
        "{} {}",
        ad.creative_body,
        ad.ocr_text.as_deref().unwrap_or_default()
    );
    joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Hex SHA-256 of [`normalized_text`].
#[must_use]
pub fn text_hash(ad: &Ad) -> String {
    format!("{:x}", Sha256::digest(normalized_text(ad).as_bytes()))
}

fn image_hash(ad: &Ad, source: &dyn ImageSource) -> Option<u64> {
    let path = ad.image_path.as_deref()?;
    match source.load(path) {
        Ok(image) => Some(perceptual_hash(&image)),
        Err(e) => {
            tracing::debug!(ad_id = %ad.ad_id, error = %e, "failed to compute phash");
            None
        }
    }
}

/// Whether `candidate` lies within `threshold` bits of any kept hash.
#[must_use]
pub fn is_visual_duplicate(candidate: u64, kept: &[u64], threshold: u32) -> bool {
    kept.iter()
        .map(|&existing| hamming_distance(existing, candidate))
        .min()
        .is_some_and(|distance| distance <= threshold)
}

#[cfg(test)]
#[path = "dedupe_test.rs"]
mod tests;
