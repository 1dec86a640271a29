/// Side length of the normalized sigil frame. All geometry lives in [0, FRAME].
pub const FRAME: f64 = 100.0;

/// Frame center (both axes).
pub const CENTER: f64 = FRAME / 2.0;

/// Innermost radius a letter position may sit at.
pub const BASE_RADIUS: f64 = 26.0;

/// Radial step per letter band. Letters are banded by alphabet index mod RADIUS_BANDS.
pub const RADIUS_STEP: f64 = 3.0;

/// Number of radial bands. BASE_RADIUS + (RADIUS_BANDS - 1) * RADIUS_STEP must stay
/// below CENTER minus the widest stroke, so nothing clips.
pub const RADIUS_BANDS: u32 = 5;

/// Radius of the placeholder ring drawn for degenerate input.
pub const PLACEHOLDER_RADIUS: f64 = 12.0;

/// How far a balanced curve's control point is pulled toward the center (0 = straight).
pub const CURVE_PULL: f64 = 0.35;

/// Stroke widths in frame units, per variant.
pub const DENSE_STROKE_WIDTH: f64 = 1.5;
pub const BALANCED_STROKE_WIDTH: f64 = 2.0;
pub const MINIMAL_STROKE_WIDTH: f64 = 3.0;

/// Letters treated as vowels by the distiller.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Raster defaults for structure comparison.
pub const RASTER_SIZE: usize = 256;
pub const RASTER_STROKE_WIDTH: f64 = 4.0;
pub const RASTER_PADDING: f64 = 0.12;

/// Structure-match defaults.
pub const PASS_THRESHOLD: f64 = 0.85;
pub const ARTISTIC_THRESHOLD: f64 = 0.70;
pub const IOU_WEIGHT: f64 = 0.7;
pub const EDGE_WEIGHT: f64 = 0.3;
pub const EDGE_TOLERANCE: usize = 3;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-9;
