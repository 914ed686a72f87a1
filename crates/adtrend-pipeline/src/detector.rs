//! Person detection capability used by image analysis.

use adtrend_core::PersonDetectorKind;
use image::GrayImage;
use imageproc::rect::Rect;

use crate::error::DetectError;

/// Finds regions of interest (people) in a grayscale frame.
pub trait PersonDetector: Send + Sync {
    /// Regions where a person was detected. Empty means none found.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError`] if the detector could not run.
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Rect>, DetectError>;
}

/// Build the detector selected by configuration.
#[must_use]
pub fn detector_for(kind: PersonDetectorKind) -> Box<dyn PersonDetector> {
    match kind {
        PersonDetectorKind::None => Box::new(NoPersonDetector),
        PersonDetectorKind::Brightness => Box::new(BrightnessDetector::default()),
    }
}

/// Never reports a person.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersonDetector;

impl PersonDetector for NoPersonDetector {
    fn detect(&self, _gray: &GrayImage) -> Result<Vec<Rect>, DetectError> {
        Ok(Vec::new())
    }
}

/// Whole-frame heuristic: very bright creatives (studio portraits on white)
/// are reported as containing a person.
#[derive(Debug, Clone, Copy)]
pub struct BrightnessDetector {
    /// Mean luminance in `[0, 1]` above which the frame counts as a detection.
    pub threshold: f64,
}

impl Default for BrightnessDetector {
    fn default() -> Self {
        Self { threshold: 0.85 }
    }
}

impl PersonDetector for BrightnessDetector {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Rect>, DetectError> {
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let sum: u64 = gray.pixels().map(|p| u64::from(p.0[0])).sum();
        #[allow(clippy::cast_precision_loss)]
        let brightness = sum as f64 / (f64::from(width) * f64::from(height) * 255.0);

        if brightness > self.threshold {
            Ok(vec![Rect::at(0, 0).of_size(width, height)])
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn no_person_detector_is_always_empty() {
        let gray = GrayImage::from_pixel(8, 8, Luma([255]));
        assert!(NoPersonDetector.detect(&gray).unwrap().is_empty());
    }

    #[test]
    fn brightness_detector_flags_bright_frame() {
        let gray = GrayImage::from_pixel(10, 6, Luma([250]));
        let regions = BrightnessDetector::default().detect(&gray).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].width(), 10);
        assert_eq!(regions[0].height(), 6);
    }

    #[test]
    fn brightness_detector_ignores_mid_gray() {
        let gray = GrayImage::from_pixel(10, 10, Luma([128]));
        assert!(BrightnessDetector::default().detect(&gray).unwrap().is_empty());
    }

    #[test]
    fn brightness_detector_handles_empty_frame() {
        let gray = GrayImage::new(0, 0);
        assert!(BrightnessDetector::default().detect(&gray).unwrap().is_empty());
    }
}
