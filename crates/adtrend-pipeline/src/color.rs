//! Dominant palette colour by HSV pixel counting.

use adtrend_core::DominantColor;
use image::RgbImage;

/// Inclusive-exclusive HSV bounds for one palette entry.
///
/// Hue is in degrees `[0, 360)`; saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
struct HsvBounds {
    hues: &'static [(f32, f32)],
    saturation: (f32, f32),
    value: (f32, f32),
}

impl HsvBounds {
    fn contains(&self, (h, s, v): (f32, f32, f32)) -> bool {
        self.hues.iter().any(|&(lo, hi)| h >= lo && h < hi)
            && s >= self.saturation.0
            && s <= self.saturation.1
            && v >= self.value.0
            && v <= self.value.1
    }
}

const SATURATED: (f32, f32) = (0.4, 1.0);
const VISIBLE: (f32, f32) = (0.25, 1.0);

/// Palette in tie-break order. Hue bands are disjoint.
const PALETTE: [(DominantColor, HsvBounds); 6] = [
    (
        DominantColor::Red,
        HsvBounds {
            hues: &[(0.0, 15.0), (345.0, 360.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
    (
        DominantColor::Orange,
        HsvBounds {
            hues: &[(15.0, 40.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
    (
        DominantColor::Yellow,
        HsvBounds {
            hues: &[(40.0, 70.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
    (
        DominantColor::Green,
        HsvBounds {
            hues: &[(70.0, 165.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
    (
        DominantColor::Blue,
        HsvBounds {
            hues: &[(165.0, 255.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
    (
        DominantColor::Purple,
        HsvBounds {
            hues: &[(255.0, 345.0)],
            saturation: SATURATED,
            value: VISIBLE,
        },
    ),
];

/// Palette entry matching the most pixels, or `Neutral` when no pixel is
/// saturated and bright enough to match any entry.
#[must_use]
pub fn dominant_color(image: &RgbImage) -> DominantColor {
    let mut counts = [0usize; PALETTE.len()];
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        let hsv = rgb_to_hsv(r, g, b);
        if let Some(idx) = PALETTE.iter().position(|(_, bounds)| bounds.contains(hsv)) {
            counts[idx] += 1;
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (idx, &count) in counts.iter().enumerate() {
        if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((idx, count));
        }
    }

    best.map_or(DominantColor::Neutral, |(idx, _)| PALETTE[idx].0)
}

/// Convert 8-bit RGB to (hue degrees, saturation, value).
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let (r, g, b) = (
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max > 0.0 { delta / max } else { 0.0 };
    if delta <= f32::EPSILON {
        return (0.0, saturation, max);
    }

    #[allow(clippy::float_cmp)]
    let hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (hue.rem_euclid(360.0), saturation, max)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn solid(rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(16, 16, Rgb(rgb))
    }

    #[test]
    fn hsv_of_primaries() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert!(h.abs() < 1e-3 && (s - 1.0).abs() < 1e-6 && (v - 1.0).abs() < 1e-6);
        assert!((rgb_to_hsv(0, 255, 0).0 - 120.0).abs() < 1e-3);
        assert!((rgb_to_hsv(0, 0, 255).0 - 240.0).abs() < 1e-3);
    }

    #[test]
    fn hsv_of_gray_has_no_saturation() {
        let (_, s, v) = rgb_to_hsv(128, 128, 128);
        assert!(s.abs() < 1e-6);
        assert!((v - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn solid_colors_map_to_palette() {
        assert_eq!(dominant_color(&solid([255, 0, 0])), DominantColor::Red);
        assert_eq!(dominant_color(&solid([255, 140, 0])), DominantColor::Orange);
        assert_eq!(dominant_color(&solid([250, 220, 30])), DominantColor::Yellow);
        assert_eq!(dominant_color(&solid([30, 180, 60])), DominantColor::Green);
        assert_eq!(dominant_color(&solid([20, 60, 220])), DominantColor::Blue);
        assert_eq!(dominant_color(&solid([140, 40, 200])), DominantColor::Purple);
    }

    #[test]
    fn grays_are_neutral() {
        assert_eq!(dominant_color(&solid([255, 255, 255])), DominantColor::Neutral);
        assert_eq!(dominant_color(&solid([0, 0, 0])), DominantColor::Neutral);
        assert_eq!(dominant_color(&solid([120, 120, 120])), DominantColor::Neutral);
    }

    #[test]
    fn majority_wins() {
        let img = RgbImage::from_fn(10, 10, |x, _| {
            if x < 7 {
                Rgb([20, 60, 220])
            } else {
                Rgb([255, 0, 0])
            }
        });
        assert_eq!(dominant_color(&img), DominantColor::Blue);
    }

    #[test]
    fn tie_resolves_to_earlier_palette_entry() {
        let img = RgbImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgb([20, 60, 220])
            } else {
                Rgb([30, 180, 60])
            }
        });
        assert_eq!(dominant_color(&img), DominantColor::Green);
    }
}
