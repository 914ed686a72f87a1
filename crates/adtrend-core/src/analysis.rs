//! Semantic description derived from an ad's creative image.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Palette bucket of the most frequent saturated hue in an image.
///
/// Declaration order is the palette order; ties on pixel count resolve to the
/// earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Neutral,
}

impl DominantColor {
    /// Saturated palette entries, excluding `Neutral`.
    pub const PALETTE: [DominantColor; 6] = [
        DominantColor::Red,
        DominantColor::Orange,
        DominantColor::Yellow,
        DominantColor::Green,
        DominantColor::Blue,
        DominantColor::Purple,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DominantColor::Red => "red",
            DominantColor::Orange => "orange",
            DominantColor::Yellow => "yellow",
            DominantColor::Green => "green",
            DominantColor::Blue => "blue",
            DominantColor::Purple => "purple",
            DominantColor::Neutral => "neutral",
        }
    }
}

impl fmt::Display for DominantColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge-density class of the creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    TextHeavy,
    Balanced,
    Visual,
}

impl LayoutType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::TextHeavy => "text-heavy",
            LayoutType::Balanced => "balanced",
            LayoutType::Visual => "visual",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse rhetorical classification of the ad copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pitch {
    Rational,
    Emotional,
    Balanced,
}

impl Pitch {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Pitch::Rational => "rational",
            Pitch::Emotional => "emotional",
            Pitch::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of image analysis for one ad. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub dominant_color: DominantColor,
    pub has_person: bool,
    pub layout_type: LayoutType,
    pub pitch: Pitch,
}
