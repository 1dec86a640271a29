use serde::{Deserialize, Serialize};

use crate::distill::{DistilledLetters, normalize_letters};
use crate::geometry::{Stroke, letter_positions, plan_strokes};
use crate::raster::{Mask, RasterConfig, rasterize};
use crate::svg::{VIEW_BOX, path_data, render_document};
use crate::variant::{ALL_VARIANTS, SigilVariant};

/// Facts about how a sigil was produced, for display and diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub letter_count: usize,
    pub stroke_count: usize,
    pub stroke_width: f64,
    pub view_box: String,
    /// True when the input letters had to be cleaned up before layout.
    pub normalized_input: bool,
    /// True when the placeholder glyph was drawn instead of a letter layout.
    pub placeholder: bool,
}

/// One generated sigil. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigilGenerationResult {
    pub variant: SigilVariant,
    pub svg: String,
    pub source_letters: DistilledLetters,
    pub metadata: GenerationMetadata,
}

impl SigilGenerationResult {
    /// Geometry behind `svg`, rebuilt from the source letters and variant.
    /// Works the same on results that came back through JSON.
    pub fn strokes(&self) -> Vec<Stroke> {
        plan_strokes(&letter_positions(self.source_letters.as_slice()), self.variant)
    }

    /// Rasterize this sigil's own geometry for structure comparison.
    pub fn rasterize(&self, config: &RasterConfig) -> Mask {
        rasterize(&self.strokes(), config)
    }
}

/// Generate one sigil variant from a letter sequence.
///
/// Never fails. Input is normalized first (non-letters dropped, uppercased,
/// repeats removed); zero or one usable letter yields the placeholder glyph.
/// Output depends only on the normalized letters and the variant.
pub fn generate_variant(letters: &[char], variant: SigilVariant) -> SigilGenerationResult {
    let (letters, normalized_input) = normalize_letters(letters.iter().copied());
    if normalized_input {
        tracing::debug!(%letters, %variant, "normalized generator input");
    }

    let positions = letter_positions(letters.as_slice());
    let strokes = plan_strokes(&positions, variant);
    let placeholder = letters.len() < 2;
    if placeholder {
        tracing::debug!(count = letters.len(), %variant, "drawing placeholder glyph");
    }

    let stroke_width = variant.stroke_width();
    let svg = render_document(&path_data(&strokes), stroke_width);

    SigilGenerationResult {
        variant,
        svg,
        metadata: GenerationMetadata {
            letter_count: letters.len(),
            stroke_count: strokes.len(),
            stroke_width,
            view_box: VIEW_BOX.to_string(),
            normalized_input,
            placeholder,
        },
        source_letters: letters,
    }
}

/// Generate every variant, in [`ALL_VARIANTS`] order (balanced, dense, minimal).
pub fn generate_all_variants(letters: &[char]) -> [SigilGenerationResult; 3] {
    ALL_VARIANTS.map(|variant| generate_variant(letters, variant))
}

/// Serialize results as pretty JSON for hand-off to the host application.
pub fn export_json(results: &[SigilGenerationResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
