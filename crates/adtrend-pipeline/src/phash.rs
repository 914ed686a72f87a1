//! 64-bit DCT perceptual hash.
//!
//! The image is reduced to 32×32 grayscale, transformed with an orthonormal
//! 2-D DCT-II, and the top-left 8×8 low-frequency block is thresholded
//! against its median. Bits are packed row-major, most significant first.

use std::f64::consts::PI;

use image::imageops::{self, FilterType};
use image::RgbImage;

const SAMPLE_SIDE: usize = 32;
const BLOCK_SIDE: usize = 8;

/// Perceptual hash of an image. Equal images always hash equal; visually
/// similar images land within a small Hamming distance.
#[must_use]
pub fn perceptual_hash(image: &RgbImage) -> u64 {
    let gray = imageops::grayscale(image);
    #[allow(clippy::cast_possible_truncation)]
    let side = SAMPLE_SIDE as u32;
    let small = imageops::resize(&gray, side, side, FilterType::Triangle);
    let samples: Vec<f64> = small.pixels().map(|p| f64::from(p.0[0])).collect();

    let block = low_frequency_block(&samples);
    let median = median(&block);
    block
        .iter()
        .fold(0u64, |hash, &coeff| (hash << 1) | u64::from(coeff > median))
}

/// Number of differing bits between two hashes.
#[must_use]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Orthonormal DCT-II basis rows `0..BLOCK_SIDE` over `SAMPLE_SIDE` points.
fn dct_basis() -> [[f64; SAMPLE_SIDE]; BLOCK_SIDE] {
    #[allow(clippy::cast_precision_loss)]
    let n = SAMPLE_SIDE as f64;
    let mut basis = [[0.0; SAMPLE_SIDE]; BLOCK_SIDE];
    for (k, row) in basis.iter_mut().enumerate() {
        let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
        for (i, value) in row.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * n);
            *value = scale * angle.cos();
        }
    }
    basis
}

/// Top-left `BLOCK_SIDE`² coefficients of the 2-D DCT of a
/// `SAMPLE_SIDE`² row-major sample grid, row-major.
fn low_frequency_block(samples: &[f64]) -> [f64; BLOCK_SIDE * BLOCK_SIDE] {
    let basis = dct_basis();

    // Transform each row, keeping only the low horizontal frequencies.
    let mut rows = [[0.0; BLOCK_SIDE]; SAMPLE_SIDE];
    for (y, row_out) in rows.iter_mut().enumerate() {
        let row = &samples[y * SAMPLE_SIDE..(y + 1) * SAMPLE_SIDE];
        for (v, out) in row_out.iter_mut().enumerate() {
            *out = row.iter().zip(basis[v].iter()).map(|(p, b)| p * b).sum();
        }
    }

    let mut block = [0.0; BLOCK_SIDE * BLOCK_SIDE];
    for u in 0..BLOCK_SIDE {
        for v in 0..BLOCK_SIDE {
            block[u * BLOCK_SIDE + v] = rows
                .iter()
                .zip(basis[u].iter())
                .map(|(row, b)| row[v] * b)
                .sum();
        }
    }
    block
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn textured(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let (fx, fy) = (f64::from(x), f64::from(y));
            let wave = (fx * 0.045 + fy * 0.021).sin() * (fy * 0.033 - fx * 0.012).cos();
            let ripple = ((fx - 90.0).hypot(fy - 60.0) * 0.05).cos();
            let v = 128.0 + 60.0 * wave + 30.0 * ripple;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let g = v.clamp(0.0, 255.0) as u8;
            Rgb([g, g / 2, 255 - g])
        })
    }

    #[test]
    fn hamming_distance_counts_bits() {
        assert_eq!(hamming_distance(0, 0), 0);
        assert_eq!(hamming_distance(0b1011, 0b0001), 2);
        assert_eq!(hamming_distance(u64::MAX, 0), 64);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dct_of_flat_grid_is_dc_only() {
        let samples = vec![100.0; SAMPLE_SIDE * SAMPLE_SIDE];
        let block = low_frequency_block(&samples);
        // Orthonormal DC term is mean * N.
        assert!((block[0] - 3200.0).abs() < 1e-6);
        assert!(block[1..].iter().all(|c| c.abs() < 1e-6));
    }

    #[test]
    fn hash_is_deterministic() {
        let img = textured(256, 256);
        assert_eq!(perceptual_hash(&img), perceptual_hash(&img));
    }

    #[test]
    fn one_pixel_crop_stays_close() {
        let img = textured(256, 256);
        let cropped = imageops::crop_imm(&img, 1, 1, 255, 255).to_image();
        let distance = hamming_distance(perceptual_hash(&img), perceptual_hash(&cropped));
        assert!(distance <= 5, "expected distance <= 5, got {distance}");
    }

    #[test]
    fn different_images_are_far_apart() {
        let a = textured(256, 256);
        let b = imageops::rotate90(&a);
        let distance = hamming_distance(perceptual_hash(&a), perceptual_hash(&b));
        assert!(distance > 5, "expected distance > 5, got {distance}");
    }
}
