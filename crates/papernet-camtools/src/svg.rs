//! SVG dieline documents
//!
//! Cutters read the stroke colour to tell cut lines from score lines, so the
//! two path sets are written as separate `<path>` elements. Geometry is
//! mirrored from the y-up drawing frame into SVG's y-down frame.

use papernet_core::Result;
use papernet_designer::{affine, Bounds, PathData};
use serde::{Deserialize, Serialize};

use crate::net::Dieline;

/// Flattening tolerance for the document bounds, in millimetres
const BOUNDS_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    pub cut_stroke: String,
    pub score_stroke: String,
    /// Stroke width in millimetres
    pub stroke_width: f64,
    /// Padding around the drawing in millimetres
    pub margin: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            cut_stroke: "#ff0000".to_string(),
            score_stroke: "#0000ff".to_string(),
            stroke_width: 0.2,
            margin: 10.0,
        }
    }
}

/// Whether `value` is a stroke colour a cutter driver understands: `#rgb`,
/// `#rrggbb` or a named colour such as `red`.
pub fn is_stroke_colour(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn path_element(out: &mut String, path: &PathData, stroke: &str, width: f64) {
    if path.is_empty() {
        return;
    }
    out.push_str(&format!(
        "  <path d=\"{}\" style=\"fill:none;stroke:{};stroke-width:{:.2}\" />\n",
        path,
        xml_escape(stroke),
        width
    ));
}

/// Render `dieline` as a standalone SVG document in millimetres.
pub fn render_svg(dieline: &Dieline, style: &SvgStyle) -> Result<String> {
    let flip = affine(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
    let cut = dieline.cut.transform(&flip)?;
    let score = dieline.score.transform(&flip)?;

    let bounds = match (cut.bounds(BOUNDS_TOLERANCE), score.bounds(BOUNDS_TOLERANCE)) {
        (Some(a), Some(b)) => a.union(&b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        },
    };

    let min_x = bounds.min_x - style.margin;
    let min_y = bounds.min_y - style.margin;
    let width = bounds.width() + 2.0 * style.margin;
    let height = bounds.height() + 2.0 * style.margin;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg width="{:.2}mm" height="{:.2}mm" viewBox="{:.2} {:.2} {:.2} {:.2}" xmlns="http://www.w3.org/2000/svg">
"#,
        width, height, min_x, min_y, width, height
    ));
    path_element(&mut svg, &cut, &style.cut_stroke, style.stroke_width);
    path_element(&mut svg, &score, &style.score_stroke, style.stroke_width);
    svg.push_str("</svg>\n");

    tracing::debug!(width, height, "svg dieline rendered");
    Ok(svg)
}
