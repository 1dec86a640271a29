use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_RADIUS, CENTER, CURVE_PULL, EPSILON, PLACEHOLDER_RADIUS, RADIUS_BANDS, RADIUS_STEP,
};
use crate::variant::SigilVariant;

/// A point in the normalized frame. Origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn center() -> Self {
        Self::new(CENTER, CENTER)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One drawable element of a sigil.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stroke {
    Line { from: Point, to: Point },
    /// Quadratic Bézier.
    Curve { from: Point, ctrl: Point, to: Point },
    Ring { center: Point, radius: f64 },
}

impl Stroke {
    /// Evaluate the stroke at parameter t in [0, 1].
    pub fn point_at(&self, t: f64) -> Point {
        match *self {
            Stroke::Line { from, to } => from.lerp(to, t),
            Stroke::Curve { from, ctrl, to } => {
                let a = from.lerp(ctrl, t);
                let b = ctrl.lerp(to, t);
                a.lerp(b, t)
            }
            Stroke::Ring { center, radius } => {
                let theta = -FRAC_PI_2 + t * TAU;
                Point::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            }
        }
    }

    /// Upper bound on arc length, used to pick a sampling density.
    pub fn approx_length(&self) -> f64 {
        match *self {
            Stroke::Line { from, to } => from.distance(to),
            Stroke::Curve { from, ctrl, to } => from.distance(ctrl) + ctrl.distance(to),
            Stroke::Ring { radius, .. } => TAU * radius,
        }
    }

    /// Points along the stroke spaced at most `step` apart (endpoints included).
    pub fn sample(&self, step: f64) -> Vec<Point> {
        let step = step.max(EPSILON);
        let segments = (self.approx_length() / step).ceil().max(1.0) as usize;
        (0..=segments)
            .map(|k| self.point_at(k as f64 / segments as f64))
            .collect()
    }
}

/// Radial band for a letter, so different letters land at different distances.
fn radius_for(letter: char) -> f64 {
    let index = (letter.to_ascii_uppercase() as u32).saturating_sub('A' as u32);
    BASE_RADIUS + (index % RADIUS_BANDS) as f64 * RADIUS_STEP
}

/// Place letters clockwise around the center, starting at twelve o'clock.
///
/// Angle comes from the letter's index in the sequence; radius from the letter
/// itself. Expects normalized uppercase letters.
pub fn letter_positions(letters: &[char]) -> Vec<Point> {
    let n = letters.len();
    letters
        .iter()
        .enumerate()
        .map(|(i, &letter)| {
            let theta = -FRAC_PI_2 + i as f64 * TAU / n as f64;
            let r = radius_for(letter);
            Point::new(CENTER + r * theta.cos(), CENTER + r * theta.sin())
        })
        .collect()
}

/// Control point for a loop edge, pulled from the chord midpoint toward the center.
fn inward_control(a: Point, b: Point) -> Point {
    a.lerp(b, 0.5).lerp(Point::center(), CURVE_PULL)
}

/// Glyph used when there is nothing (or only one thing) to connect.
fn placeholder(positions: &[Point]) -> Vec<Stroke> {
    let center = Point::center();
    let mut strokes = vec![Stroke::Ring {
        center,
        radius: PLACEHOLDER_RADIUS,
    }];
    if let Some(&p) = positions.first() {
        strokes.push(Stroke::Line {
            from: Point::new(CENTER, CENTER - PLACEHOLDER_RADIUS),
            to: p,
        });
    }
    strokes
}

/// Strokes connecting letter positions for the given variant.
///
/// - minimal: one open path visiting each position in sequence order.
/// - balanced: closed loop of inward-curving edges, plus chords between
///   opposite positions once there are at least four.
/// - dense: a straight segment between every pair of positions.
///
/// Two positions have only one pair, so every variant yields a single stroke:
/// dense and minimal draw the same line and differ only in stroke width,
/// balanced bows it inward.
pub fn plan_strokes(positions: &[Point], variant: SigilVariant) -> Vec<Stroke> {
    let n = positions.len();
    if n < 2 {
        return placeholder(positions);
    }

    match variant {
        SigilVariant::Minimal => positions
            .windows(2)
            .map(|w| Stroke::Line {
                from: w[0],
                to: w[1],
            })
            .collect(),
        SigilVariant::Balanced => {
            let edges = if n == 2 { 1 } else { n };
            let mut strokes: Vec<Stroke> = (0..edges)
                .map(|i| {
                    let from = positions[i];
                    let to = positions[(i + 1) % n];
                    Stroke::Curve {
                        from,
                        ctrl: inward_control(from, to),
                        to,
                    }
                })
                .collect();
            if n >= 4 {
                let half = n / 2;
                strokes.extend((0..half).map(|i| Stroke::Line {
                    from: positions[i],
                    to: positions[i + half],
                }));
            }
            strokes
        }
        SigilVariant::Dense => {
            let mut strokes = Vec::with_capacity(n * (n - 1) / 2);
            for i in 0..n {
                for j in (i + 1)..n {
                    strokes.push(Stroke::Line {
                        from: positions[i],
                        to: positions[j],
                    });
                }
            }
            strokes
        }
    }
}

/// Axis-aligned bounds `(min, max)` of sampled stroke geometry, or None when empty.
pub fn bounds(strokes: &[Stroke]) -> Option<(Point, Point)> {
    let mut points = strokes.iter().flat_map(|s| s.sample(1.0));
    let first = points.next()?;
    Some(points.fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}
