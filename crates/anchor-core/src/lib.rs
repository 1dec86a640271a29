//! Anchor sigil pipeline.
//!
//! Distills a free-text intention into an ordered set of consonants, then lays
//! those letters out on a fixed 100x100 frame and connects them into one of
//! three deterministic glyph variants, serialized as SVG. Also rasterizes
//! glyphs and scores how well one rendition preserves another's structure.
//!
//! Zero I/O. Every operation is a pure function of its inputs.

pub mod constants;
pub mod distill;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod sigil;
pub mod structure;
pub mod svg;
pub mod variant;

pub use constants::{CENTER, FRAME, VOWELS};
pub use distill::{DistillResult, DistilledLetters, distill, is_vowel, normalize_letters};
pub use error::{CoreError, Result};
pub use geometry::{Point, Stroke};
pub use raster::{Mask, RasterConfig, rasterize};
pub use sigil::{
    GenerationMetadata, SigilGenerationResult, export_json, generate_all_variants, generate_variant,
};
pub use structure::{
    Classification, MatchAnalysis, StructureMatch, StructureMatchConfig, needs_regeneration,
    structure_match,
};
pub use svg::{VIEW_BOX, prepare_line_art};
pub use variant::{ALL_VARIANTS, SigilVariant, UnknownVariant};
