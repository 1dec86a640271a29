use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BALANCED_STROKE_WIDTH, DENSE_STROKE_WIDTH, MINIMAL_STROKE_WIDTH};

/// Layout strategy applied to a letter sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SigilVariant {
    /// Every letter position connected to every other.
    Dense,
    /// Closed curved loop plus symmetric chords. The default recommendation.
    #[default]
    Balanced,
    /// One open stroke through the positions in order.
    Minimal,
}

/// Stable presentation order. Balanced comes first as the first-time default.
pub const ALL_VARIANTS: [SigilVariant; 3] = [
    SigilVariant::Balanced,
    SigilVariant::Dense,
    SigilVariant::Minimal,
];

impl SigilVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            SigilVariant::Dense => "dense",
            SigilVariant::Balanced => "balanced",
            SigilVariant::Minimal => "minimal",
        }
    }

    /// Stroke width in frame units. Sparser glyphs get heavier lines.
    pub fn stroke_width(self) -> f64 {
        match self {
            SigilVariant::Dense => DENSE_STROKE_WIDTH,
            SigilVariant::Balanced => BALANCED_STROKE_WIDTH,
            SigilVariant::Minimal => MINIMAL_STROKE_WIDTH,
        }
    }
}

impl fmt::Display for SigilVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sigil variant '{}' (expected dense, balanced or minimal)",
            self.0
        )
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for SigilVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(SigilVariant::Dense),
            "balanced" => Ok(SigilVariant::Balanced),
            "minimal" => Ok(SigilVariant::Minimal),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
