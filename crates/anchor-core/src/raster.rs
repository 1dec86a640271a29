use serde::{Deserialize, Serialize};

use crate::constants::{FRAME, RASTER_PADDING, RASTER_SIZE, RASTER_STROKE_WIDTH};
use crate::error::{CoreError, Result};
use crate::geometry::{Point, Stroke};

/// How stroke geometry is turned into pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterConfig {
    /// Mask side length in pixels.
    pub size: usize,
    /// Stroke diameter in pixels.
    pub stroke_width: f64,
    /// Margin on each side, as a fraction of `size`.
    pub padding: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            size: RASTER_SIZE,
            stroke_width: RASTER_STROKE_WIDTH,
            padding: RASTER_PADDING,
        }
    }
}

impl RasterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(16..=4096).contains(&self.size) {
            return Err(CoreError::InvalidConfig(format!(
                "raster size {} outside 16..=4096",
                self.size
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "raster stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        if !(0.0..0.4).contains(&self.padding) {
            return Err(CoreError::InvalidConfig(format!(
                "raster padding {} outside [0, 0.4)",
                self.padding
            )));
        }
        Ok(())
    }

    fn scale(&self) -> f64 {
        self.size as f64 * (1.0 - 2.0 * self.padding) / FRAME
    }

    fn to_pixel(&self, p: Point) -> (f64, f64) {
        let offset = self.size as f64 * self.padding;
        let scale = self.scale();
        (offset + p.x * scale, offset + p.y * scale)
    }
}

/// Square binary image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    size: usize,
    pixels: Vec<bool>,
}

impl Mask {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.pixels[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize) {
        if x < self.size && y < self.size {
            self.pixels[y * self.size + x] = true;
        }
    }

    /// Number of "on" pixels.
    pub fn count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.pixels.iter().any(|p| *p)
    }

    /// Resample to `size` by area majority: a target pixel is on when at least
    /// half of the source pixels it covers are on. Each target pixel covers at
    /// least one source pixel, so upsizing degrades to nearest-neighbour.
    pub fn resized(&self, size: usize) -> Mask {
        if size == self.size {
            return self.clone();
        }
        let mut out = Mask::new(size);
        if self.size == 0 {
            return out;
        }
        let span = |i: usize| {
            let lo = i * self.size / size;
            let hi = ((i + 1) * self.size / size).max(lo + 1).min(self.size);
            lo..hi
        };
        for y in 0..size {
            let rows = span(y);
            for x in 0..size {
                let cols = span(x);
                let total = rows.len() * cols.len();
                let on = rows
                    .clone()
                    .flat_map(|sy| cols.clone().map(move |sx| (sx, sy)))
                    .filter(|&(sx, sy)| self.get(sx, sy))
                    .count();
                if total > 0 && on * 2 >= total {
                    out.set(x, y);
                }
            }
        }
        out
    }

    /// Set every pixel whose center lies within `radius` of (cx, cy).
    /// The pixel containing the point is always set.
    pub fn stamp_disk(&mut self, cx: f64, cy: f64, radius: f64) {
        if cx >= 0.0 && cy >= 0.0 {
            self.set(cx as usize, cy as usize);
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor().max(0.0) as usize;
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let x1 = (cx + radius).ceil().max(0.0) as usize;
        let y1 = (cy + radius).ceil().max(0.0) as usize;
        for y in y0..=y1.min(self.size.saturating_sub(1)) {
            for x in x0..=x1.min(self.size.saturating_sub(1)) {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set(x, y);
                }
            }
        }
    }
}

/// Draw strokes into a fresh mask. The normalized frame maps onto the mask
/// inside the configured padding; samples are half a pixel apart.
pub fn rasterize(strokes: &[Stroke], config: &RasterConfig) -> Mask {
    let mut mask = Mask::new(config.size);
    let scale = config.scale();
    if scale <= 0.0 {
        return mask;
    }
    let step = 0.5 / scale;
    let radius = config.stroke_width / 2.0;

    for stroke in strokes {
        for p in stroke.sample(step) {
            let (px, py) = config.to_pixel(p);
            mask.stamp_disk(px, py, radius);
        }
    }
    mask
}
