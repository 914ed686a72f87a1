//! Tag synthesis from image analysis and ad text.

use std::collections::BTreeSet;

use adtrend_core::{Ad, DominantColor, ImageAnalysis, LayoutType, Pitch};

/// Substring triggers checked against the lowercased body and OCR text.
const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("free", "promotion"),
    ("sale", "discount"),
    ("% off", "discount"),
    ("limited", "scarcity"),
    ("new", "launch"),
    ("introducing", "launch"),
    ("exclusive", "premium"),
    ("bundle", "pack"),
    ("trial", "trial"),
];

fn color_tags(color: DominantColor) -> &'static [&'static str] {
    match color {
        DominantColor::Red => &["urgent", "energetic"],
        DominantColor::Orange => &["friendly", "playful"],
        DominantColor::Yellow => &["optimistic", "attention"],
        DominantColor::Green => &["natural", "wellness"],
        DominantColor::Blue => &["trust", "calm"],
        DominantColor::Purple => &["luxury", "creative"],
        DominantColor::Neutral => &["minimal"],
    }
}

/// Sorted, deduplicated tags for an ad with the given analysis.
#[must_use]
pub fn tags_for(ad: &Ad, analysis: &ImageAnalysis) -> Vec<String> {
    let mut tags: BTreeSet<&str> = BTreeSet::new();

    let body = ad.creative_body.to_lowercase();
    let ocr = ad.ocr_text.as_deref().unwrap_or_default().to_lowercase();
    for &(needle, tag) in KEYWORD_TAGS {
        if body.contains(needle) || ocr.contains(needle) {
            tags.insert(tag);
        }
    }

    tags.extend(color_tags(analysis.dominant_color));
    tags.insert(analysis.dominant_color.as_str());

    if analysis.has_person {
        tags.insert("human-centric");
    }
    if analysis.layout_type == LayoutType::TextHeavy {
        tags.insert("informational");
    }
    match analysis.pitch {
        Pitch::Rational | Pitch::Emotional => {
            tags.insert(analysis.pitch.as_str());
        }
        Pitch::Balanced => {}
    }

    tags.into_iter().map(str::to_string).collect()
}

/// Assign tags to every analysed ad. Ads without analysis keep their
/// existing tags.
pub fn generate_tags(ads: Vec<Ad>) -> Vec<Ad> {
    ads.into_iter()
        .map(|ad| match ad.analysis {
            Some(analysis) => {
                let tags = tags_for(&ad, &analysis);
                tracing::debug!(ad_id = %ad.ad_id, count = tags.len(), "generated tags");
                ad.with_tags(tags)
            }
            None => {
                tracing::warn!(ad_id = %ad.ad_id, "no image analysis; tags left unchanged");
                ad
            }
        })
        .collect()
}
