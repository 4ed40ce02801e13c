//! Tab joinery generators
//!
//! Each generator takes the two endpoints of a net edge and a parameter
//! record, and returns cut and score paths for both pieces of the joint.
//!
//! ## Orientation
//!
//! Tabs are drawn on the right-hand side of `start → end`. Walking a face
//! boundary counter-clockwise in a y-up frame keeps the right-hand side
//! outside the face, which is where flaps belong.

pub mod ascendant;
pub mod base;

use std::f64::consts::FRAC_PI_2;

use papernet_core::{GeometryError, Point, Result};
use papernet_designer::PathData;
use serde::{Deserialize, Serialize};

use crate::dash::{dash_ratios, DashSpec};
use crate::interval::IntervalSet;

pub use ascendant::{ascendant_edge_tabs, AscendantEdgeTabs, AscendantEdgeTabsSpec};
pub use base::{base_edge_tabs, BaseEdgeTabs, BaseEdgeTabsSpec, BendGuideValley};

/// Cut and score lines of one piece
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutScore {
    pub cut: PathData,
    pub score: PathData,
}

impl CutScore {
    pub fn new(cut: PathData, score: PathData) -> Self {
        Self { cut, score }
    }
}

pub(crate) fn check_angle(name: &str, value: f64) -> std::result::Result<(), GeometryError> {
    if (0.0..FRAC_PI_2).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            name,
            format!("must lie in [0, π/2), got {value}"),
        ))
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> std::result::Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> std::result::Result<(), GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            name,
            format!("must be non-negative, got {value}"),
        ))
    }
}

/// Dash coverage of `start → end`, or the whole segment without a dash.
pub(crate) fn score_coverage(
    start: Point,
    end: Point,
    dash: Option<&DashSpec>,
) -> Result<IntervalSet> {
    match dash {
        Some(spec) => dash_ratios(start, end, spec),
        None => Ok(IntervalSet::unit()),
    }
}

/// Position of the projection of `p` onto `start → end`, as a ratio of its length.
pub(crate) fn projected_ratio(start: Point, end: Point, p: Point) -> f64 {
    let edge = end - start;
    (p - start).dot(&edge) / edge.dot(&edge)
}

/// Rounding distance limited to half the shortest of `edges`.
///
/// Logs a warning when the limit takes effect.
pub(crate) fn clamp_rounding(requested: f64, edges: &[(Point, Point)]) -> f64 {
    let shortest = edges
        .iter()
        .map(|(a, b)| a.distance_to(b))
        .fold(f64::INFINITY, f64::min);
    let limit = shortest / 2.0;
    if requested > limit {
        tracing::warn!(requested, limit, "rounding distance clamped");
        limit
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_projected_ratio() {
        let r = projected_ratio(pt(0.0, 0.0), pt(10.0, 0.0), pt(2.5, -4.0));
        assert!((r - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_rounding() {
        let edges = [(pt(0.0, 0.0), pt(4.0, 0.0)), (pt(4.0, 0.0), pt(4.0, 10.0))];
        assert_eq!(clamp_rounding(1.0, &edges), 1.0);
        assert_eq!(clamp_rounding(3.0, &edges), 2.0);
    }

    #[test]
    fn test_unit_coverage_without_dash() {
        let coverage = score_coverage(pt(0.0, 0.0), pt(1.0, 0.0), None).unwrap();
        assert_eq!(coverage, IntervalSet::unit());
    }
}
