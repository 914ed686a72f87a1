//! Advertisement records as they move through the processing stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::ImageAnalysis;

/// One advertisement creative.
///
/// Upstream adapters fill the identity, text and image fields. Each processing
/// stage takes the record by value and hands it on with its own derived field
/// set; derived fields are only ever added, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub ad_id: String,
    #[serde(default)]
    pub creative_body: String,
    /// Text recognised in the creative. `None` means OCR never produced a
    /// result, which is distinct from an empty string.
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub advertiser: Option<String>,
    #[serde(default)]
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub analysis: Option<ImageAnalysis>,
    /// Hex SHA-256 of the normalized ad text.
    #[serde(default)]
    pub text_hash: Option<String>,
    /// 64-bit DCT perceptual hash of the creative image.
    #[serde(default)]
    pub phash: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Ad {
    #[must_use]
    pub fn new(ad_id: impl Into<String>, creative_body: impl Into<String>) -> Self {
        Self {
            ad_id: ad_id.into(),
            creative_body: creative_body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ocr_text(self, ocr_text: impl Into<String>) -> Self {
        Self {
            ocr_text: Some(ocr_text.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_image_path(self, image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: Some(image_path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_call_to_action(self, call_to_action: impl Into<String>) -> Self {
        Self {
            call_to_action: Some(call_to_action.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_analysis(self, analysis: ImageAnalysis) -> Self {
        Self {
            analysis: Some(analysis),
            ..self
        }
    }

    #[must_use]
    pub fn with_text_hash(self, text_hash: String) -> Self {
        Self {
            text_hash: Some(text_hash),
            ..self
        }
    }

    #[must_use]
    pub fn with_phash(self, phash: Option<u64>) -> Self {
        Self { phash, ..self }
    }

    #[must_use]
    pub fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }

    /// OCR text with surrounding whitespace removed, or `""` when absent.
    #[must_use]
    pub fn ocr_text_trimmed(&self) -> &str {
        self.ocr_text.as_deref().map_or("", str::trim)
    }
}

/// A processed ad with its final score and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAd {
    ad: Ad,
    score: f64,
    rank: usize,
}

impl RankedAd {
    #[must_use]
    pub fn new(ad: Ad, score: f64, rank: usize) -> Self {
        Self { ad, score, rank }
    }

    #[must_use]
    pub fn ad(&self) -> &Ad {
        &self.ad
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record_with_defaults() {
        let ad: Ad = serde_json::from_str(r#"{"ad_id": "a1"}"#).unwrap();
        assert_eq!(ad.ad_id, "a1");
        assert!(ad.creative_body.is_empty());
        assert!(ad.ocr_text.is_none());
        assert!(ad.image_path.is_none());
        assert!(ad.analysis.is_none());
        assert!(ad.tags.is_empty());
    }

    #[test]
    fn null_ocr_text_differs_from_empty() {
        let absent: Ad = serde_json::from_str(r#"{"ad_id": "a", "ocr_text": null}"#).unwrap();
        let empty: Ad = serde_json::from_str(r#"{"ad_id": "a", "ocr_text": ""}"#).unwrap();
        assert_eq!(absent.ocr_text, None);
        assert_eq!(empty.ocr_text.as_deref(), Some(""));
    }

    #[test]
    fn ocr_text_trimmed_handles_absent_and_padded() {
        assert_eq!(Ad::new("a", "").ocr_text_trimmed(), "");
        assert_eq!(
            Ad::new("a", "").with_ocr_text("  hello \n").ocr_text_trimmed(),
            "hello"
        );
    }

    #[test]
    fn builders_only_touch_their_field() {
        let ad = Ad::new("a", "body")
            .with_ocr_text("ocr")
            .with_phash(Some(7))
            .with_tags(vec!["x".to_string()]);
        assert_eq!(ad.creative_body, "body");
        assert_eq!(ad.ocr_text.as_deref(), Some("ocr"));
        assert_eq!(ad.phash, Some(7));
        assert_eq!(ad.tags, vec!["x".to_string()]);
        assert!(ad.text_hash.is_none());
    }
}
