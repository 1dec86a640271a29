//! Structure-preservation scoring between two rasterized sigils.
//!
//! Combines pixel IoU with a tolerance-dilated edge overlap, and classifies
//! the result so callers can tell a faithful rendition from a drifted one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARTISTIC_THRESHOLD, EDGE_TOLERANCE, EDGE_WEIGHT, IOU_WEIGHT, PASS_THRESHOLD,
};
use crate::error::{CoreError, Result};
use crate::raster::Mask;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureMatchConfig {
    /// Combined score at or above this counts as preserved.
    pub pass_threshold: f64,
    /// Combined score at or above this (but below pass) counts as artistic.
    pub artistic_threshold: f64,
    pub iou_weight: f64,
    pub edge_weight: f64,
    /// Edge matching tolerance in pixels.
    pub edge_tolerance: usize,
}

impl Default for StructureMatchConfig {
    fn default() -> Self {
        Self {
            pass_threshold: PASS_THRESHOLD,
            artistic_threshold: ARTISTIC_THRESHOLD,
            iou_weight: IOU_WEIGHT,
            edge_weight: EDGE_WEIGHT,
            edge_tolerance: EDGE_TOLERANCE,
        }
    }
}

impl StructureMatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iou_weight < 0.0 || self.edge_weight < 0.0 {
            return Err(CoreError::InvalidConfig(
                "structure weights must be non-negative".to_string(),
            ));
        }
        if ((self.iou_weight + self.edge_weight) - 1.0).abs() > 1e-6 {
            return Err(CoreError::InvalidConfig(format!(
                "structure weights must sum to 1, got {}",
                self.iou_weight + self.edge_weight
            )));
        }
        for (name, t) in [
            ("pass_threshold", self.pass_threshold),
            ("artistic_threshold", self.artistic_threshold),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} {t} outside [0, 1]"
                )));
            }
        }
        if self.artistic_threshold > self.pass_threshold {
            return Err(CoreError::InvalidConfig(
                "artistic_threshold must not exceed pass_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Preserved,
    MoreArtistic,
    StyleDrift,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Preserved => "Structure Preserved",
            Classification::MoreArtistic => "More Artistic",
            Classification::StyleDrift => "Style Drift",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw counts behind a [`StructureMatch`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    /// Side length both masks were compared at: the smaller of the two sizes.
    pub compared_size: usize,
    pub intersection: usize,
    pub union: usize,
    pub original_pixels: usize,
    pub candidate_pixels: usize,
    pub original_edges: usize,
    pub candidate_edges: usize,
    pub forward_ratio: f64,
    pub backward_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureMatch {
    pub iou: f64,
    pub edge_overlap: f64,
    pub combined: f64,
    pub preserved: bool,
    pub classification: Classification,
    pub analysis: MatchAnalysis,
}

/// Pixels that are on and touch an off pixel (4-neighbourhood) or the border.
pub fn edges(mask: &Mask, size: usize) -> Mask {
    let mut out = Mask::new(size);
    for y in 0..size {
        for x in 0..size {
            if !mask.get(x, y) {
                continue;
            }
            let boundary = x == 0
                || y == 0
                || x + 1 == size
                || y + 1 == size
                || !mask.get(x - 1, y)
                || !mask.get(x + 1, y)
                || !mask.get(x, y - 1)
                || !mask.get(x, y + 1);
            if boundary {
                out.set(x, y);
            }
        }
    }
    out
}

/// Grow every on pixel by a disk of `radius` pixels.
pub fn dilate(mask: &Mask, radius: usize) -> Mask {
    if radius == 0 {
        return mask.clone();
    }
    let size = mask.size();
    let mut out = Mask::new(size);
    for y in 0..size {
        for x in 0..size {
            if mask.get(x, y) {
                out.stamp_disk(x as f64 + 0.5, y as f64 + 0.5, radius as f64);
            }
        }
    }
    out
}

/// Compare a candidate rendering against the original.
///
/// Masks of different sizes are both resampled down to the smaller size first.
pub fn structure_match(
    original: &Mask,
    candidate: &Mask,
    config: &StructureMatchConfig,
) -> StructureMatch {
    let size = original.size().min(candidate.size());
    let original = &original.resized(size);
    let candidate = &candidate.resized(size);
    let mut analysis = MatchAnalysis {
        compared_size: size,
        ..Default::default()
    };

    for y in 0..size {
        for x in 0..size {
            let a = original.get(x, y);
            let b = candidate.get(x, y);
            analysis.original_pixels += a as usize;
            analysis.candidate_pixels += b as usize;
            analysis.intersection += (a && b) as usize;
            analysis.union += (a || b) as usize;
        }
    }
    let iou = if analysis.union == 0 {
        1.0
    } else {
        analysis.intersection as f64 / analysis.union as f64
    };

    let edges_a = edges(original, size);
    let edges_b = edges(candidate, size);
    analysis.original_edges = edges_a.count();
    analysis.candidate_edges = edges_b.count();

    let edge_overlap = if analysis.original_edges == 0 || analysis.candidate_edges == 0 {
        0.0
    } else {
        let near_a = dilate(&edges_a, config.edge_tolerance);
        let near_b = dilate(&edges_b, config.edge_tolerance);
        let mut forward = 0usize;
        let mut backward = 0usize;
        for y in 0..size {
            for x in 0..size {
                forward += (edges_a.get(x, y) && near_b.get(x, y)) as usize;
                backward += (edges_b.get(x, y) && near_a.get(x, y)) as usize;
            }
        }
        analysis.forward_ratio = forward as f64 / analysis.original_edges as f64;
        analysis.backward_ratio = backward as f64 / analysis.candidate_edges as f64;
        let sum = analysis.forward_ratio + analysis.backward_ratio;
        if sum > 0.0 {
            2.0 * analysis.forward_ratio * analysis.backward_ratio / sum
        } else {
            0.0
        }
    };

    let combined = config.iou_weight * iou + config.edge_weight * edge_overlap;
    let classification = if combined >= config.pass_threshold {
        Classification::Preserved
    } else if combined >= config.artistic_threshold {
        Classification::MoreArtistic
    } else {
        Classification::StyleDrift
    };

    StructureMatch {
        iou,
        edge_overlap,
        combined,
        preserved: combined >= config.pass_threshold,
        classification,
        analysis,
    }
}

/// Indices of preserved results, and whether fewer than `min_passing` made it.
pub fn needs_regeneration(results: &[StructureMatch], min_passing: usize) -> (bool, Vec<usize>) {
    let passing: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.preserved)
        .map(|(i, _)| i)
        .collect();
    (passing.len() < min_passing, passing)
}
