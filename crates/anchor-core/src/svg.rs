//! SVG serialization for sigil geometry, plus cleanup of externally produced sigil markup.
//!
//! Numbers are rounded to two decimals and printed without trailing zeros, so
//! the same strokes always serialize to the same bytes.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::constants::FRAME;
use crate::geometry::{Point, Stroke};

static SVG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").unwrap());
static WIDTH_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\swidth="(\d+)""#).unwrap());
static HEIGHT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sheight="(\d+)""#).unwrap());
static STROKE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)stroke="[^"]*""#).unwrap());
static FILL_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(\s)fill="[^"]*""#).unwrap());
static PATH_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<path(\s)").unwrap());

/// viewBox attribute value for generated sigils.
pub const VIEW_BOX: &str = "0 0 100 100";

/// Format a coordinate: two decimals, trailing zeros trimmed, never "-0".
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn fmt_point(p: Point) -> String {
    format!("{} {}", fmt_num(p.x), fmt_num(p.y))
}

/// Serialize strokes into path data. Consecutive strokes that share an
/// endpoint are chained without a new move-to.
pub fn path_data(strokes: &[Stroke]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut pen: Option<Point> = None;

    for stroke in strokes {
        match *stroke {
            Stroke::Line { from, to } => {
                if pen != Some(from) {
                    parts.push(format!("M {}", fmt_point(from)));
                }
                parts.push(format!("L {}", fmt_point(to)));
                pen = Some(to);
            }
            Stroke::Curve { from, ctrl, to } => {
                if pen != Some(from) {
                    parts.push(format!("M {}", fmt_point(from)));
                }
                parts.push(format!("Q {} {}", fmt_point(ctrl), fmt_point(to)));
                pen = Some(to);
            }
            Stroke::Ring { center, radius } => {
                let top = Point::new(center.x, center.y - radius);
                let bottom = Point::new(center.x, center.y + radius);
                let r = fmt_num(radius);
                parts.push(format!("M {}", fmt_point(top)));
                parts.push(format!("A {r} {r} 0 1 1 {}", fmt_point(bottom)));
                parts.push(format!("A {r} {r} 0 1 1 {}", fmt_point(top)));
                parts.push("Z".to_string());
                pen = Some(top);
            }
        }
    }

    parts.join(" ")
}

/// Wrap path data in a standalone SVG document on the normalized frame.
pub fn render_document(path_d: &str, stroke_width: f64) -> String {
    let size = fmt_num(FRAME);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{VIEW_BOX}" width="{size}" height="{size}">"#
    );
    let _ = write!(
        out,
        r#"<path d="{path_d}" fill="none" stroke="currentColor" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        fmt_num(stroke_width)
    );
    out.push_str("</svg>");
    out
}

/// Normalize sigil markup from outside the generator into plain line art.
///
/// Adds a viewBox when missing (from integer width/height on the root element,
/// else the normalized frame), forces every stroke colour to `stroke`, clears
/// fills, and gives paths a default stroke width when none is set anywhere.
/// Running it twice is a no-op.
pub fn prepare_line_art(svg: &str, stroke: &str) -> String {
    let stroke: String = stroke.chars().filter(|c| *c != '"').collect();
    let mut out = svg.to_string();

    if !out.contains("viewBox")
        && let Some(open) = SVG_OPEN.find(&out)
    {
        let tag = open.as_str();
        let view_box = match (WIDTH_ATTR.captures(tag), HEIGHT_ATTR.captures(tag)) {
            (Some(w), Some(h)) => format!("0 0 {} {}", &w[1], &h[1]),
            _ => VIEW_BOX.to_string(),
        };
        let insert_at = open.start() + "<svg".len();
        out.insert_str(insert_at, &format!(r#" viewBox="{view_box}""#));
    }

    out = STROKE_ATTR
        .replace_all(&out, |caps: &Captures| {
            format!(r#"{}stroke="{stroke}""#, &caps[1])
        })
        .into_owned();
    out = FILL_ATTR
        .replace_all(&out, r#"${1}fill="none""#)
        .into_owned();

    if !out.contains("stroke-width") {
        out = PATH_OPEN
            .replace_all(&out, r#"<path stroke-width="2"${1}"#)
            .into_owned();
    }

    out
}
