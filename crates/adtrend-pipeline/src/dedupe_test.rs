use image::{Rgb, RgbImage};

use super::*;
use crate::image_source::MemoryImageSource;

fn stripes(width: u32, period: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(width, width, |x, y| {
        if (x / period + y / (period * 2)) % 2 == 0 {
            color
        } else {
            Rgb([250, 250, 250])
        }
    })
}

fn ad(id: &str, body: &str, ocr: &str, image: &str) -> Ad {
    Ad::new(id, body).with_ocr_text(ocr).with_image_path(image)
}

#[test]
fn normalized_text_is_case_and_whitespace_insensitive() {
    let a = ad("a", "  Free   Trial ", "Save\nNow", "x.png");
    let b = ad("b", "free trial", "save now", "y.png");
    assert_eq!(normalized_text(&a), "free trial save now");
    assert_eq!(text_hash(&a), text_hash(&b));
}

#[test]
fn text_hash_is_hex_sha256() {
    let digest = text_hash(&ad("a", "", "", "x.png"));
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    // SHA-256 of the empty string.
    assert_eq!(
        digest,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn text_duplicate_dropped_regardless_of_image() {
    let source = MemoryImageSource::new()
        .with_image("one.png", stripes(64, 8, Rgb([200, 0, 0])))
        .with_image("two.png", RgbImage::from_fn(64, 64, |x, _| Rgb([0, 0, (x * 4) as u8])));
    let ads = vec![
        ad("a1", "Free Trial", "save now", "one.png"),
        ad("a2", "free trial  ", "SAVE NOW", "two.png"),
    ];
    let outcome = dedupe_ads(ads, &source, DEFAULT_PHASH_THRESHOLD).unwrap();
    assert_eq!(outcome.kept.len(), 1);
    assert_eq!(outcome.kept[0].ad_id, "a1");
    assert_eq!(outcome.dropped, 1);
}

#[test]
fn identical_image_with_different_text_is_visual_duplicate() {
    let image = stripes(64, 8, Rgb([0, 120, 0]));
    let source = MemoryImageSource::new()
        .with_image("orig.png", image.clone())
        .with_image("copy.png", image);
    let ads = vec![
        ad("a1", "Summer collection", "new arrivals", "orig.png"),
        ad("a2", "Summer colection", "new arivals", "copy.png"),
    ];
    let outcome = dedupe_ads(ads, &source, DEFAULT_PHASH_THRESHOLD).unwrap();
    assert_eq!(outcome.kept.len(), 1);
    assert_eq!(outcome.dropped, 1);
}

#[test]
fn unhashable_images_are_kept() {
    let source = MemoryImageSource::new();
    let ads = vec![
        ad("a1", "first", "one", "missing-a.png"),
        ad("a2", "second", "two", "missing-b.png"),
    ];
    let outcome = dedupe_ads(ads, &source, DEFAULT_PHASH_THRESHOLD).unwrap();
    assert_eq!(outcome.kept.len(), 2);
    assert!(outcome.kept.iter().all(|a| a.phash.is_none()));
    assert!(outcome.kept.iter().all(|a| a.text_hash.is_some()));
}

#[test]
fn survivors_carry_hashes() {
    let source = MemoryImageSource::new().with_image("one.png", stripes(64, 8, Rgb([0, 0, 200])));
    let outcome = dedupe_ads(
        vec![ad("a1", "body", "ocr", "one.png")],
        &source,
        DEFAULT_PHASH_THRESHOLD,
    )
    .unwrap();
    let kept = &outcome.kept[0];
    assert!(kept.phash.is_some());
    assert_eq!(kept.text_hash.as_deref(), Some(text_hash(kept).as_str()));
}

#[test]
fn threshold_boundary_is_inclusive() {
    let kept = [0u64];
    let at_threshold = 0b1_1111u64;
    let over_threshold = 0b11_1111u64;
    assert!(is_visual_duplicate(at_threshold, &kept, 5));
    assert!(!is_visual_duplicate(over_threshold, &kept, 5));
}

#[test]
fn visual_duplicate_uses_minimum_distance() {
    let kept = [u64::MAX, 0b1];
    assert!(is_visual_duplicate(0, &kept, 1));
    assert!(!is_visual_duplicate(0, &[], 64));
}

#[test]
fn threshold_above_64_is_invalid_argument() {
    let source = MemoryImageSource::new();
    let err = dedupe_ads(Vec::new(), &source, 65).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidArgument(_)));
}

#[test]
fn count_is_conserved() {
    let source = MemoryImageSource::new();
    let ads = vec![
        ad("a1", "x", "y", "m.png"),
        ad("a2", "x", "y", "m.png"),
        ad("a3", "z", "y", "m.png"),
    ];
    let outcome = dedupe_ads(ads, &source, DEFAULT_PHASH_THRESHOLD).unwrap();
    assert_eq!(outcome.kept.len() + outcome.dropped, 3);
    assert_eq!(outcome.dropped, 1);
}
