//! Base-edge tabs
//!
//! Joins a face's base edge to the base of the polyhedron. One piece grows a
//! handle flap with a tapered hole cut along the fold line; the mating piece
//! grows an arrow-like fin that is pushed through the hole and locks behind
//! it.

use std::f64::consts::{FRAC_PI_2, PI};

use papernet_core::{
    parallel_line_points_at_distance, symmetric_hinge_plot_by_projection_distance,
    GeometryError, Point, Result, EPSILON,
};
use papernet_designer::{rounded_corner_path, Corner, PathData};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    check_angle, check_non_negative, check_positive, clamp_rounding, projected_ratio,
    score_coverage, CutScore,
};
use crate::dash::{ratio_path, DashSpec};
use crate::interval::IntervalSet;

/// V-shaped notch in the top of the handle, easing the fold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendGuideValley {
    /// Notch depth relative to the tab depth
    pub depth_ratio: f64,
    /// Opening angle of the notch, in radians
    pub theta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseEdgeTabsSpec {
    /// Interior angle between the base edge and each handle side, in radians
    pub handle_angle: f64,
    pub hole_depth_to_tab_depth: f64,
    /// Hole width at the fold as a fraction of the edge length
    pub hole_width_ratio: f64,
    /// Inward lean of the hole sides, in radians
    pub hole_taper: f64,
    pub fin_width_to_hole_width: f64,
    pub fin_depth_to_tab_depth: f64,
    /// Outward lean of the fin sides, in radians
    pub fin_flare_angle: f64,
    /// Rounding distance relative to the tab depth
    pub rounding_distance_ratio: f64,
    pub bend_guide_valley: Option<BendGuideValley>,
    /// Score the handle along its midline too
    pub midline_score: bool,
    /// Dash for score lines; solid when absent
    pub score_dash: Option<DashSpec>,
}

impl Default for BaseEdgeTabsSpec {
    fn default() -> Self {
        Self {
            handle_angle: 60f64.to_radians(),
            hole_depth_to_tab_depth: 0.5,
            hole_width_ratio: 0.4,
            hole_taper: 10f64.to_radians(),
            fin_width_to_hole_width: 0.8,
            fin_depth_to_tab_depth: 0.5,
            fin_flare_angle: 15f64.to_radians(),
            rounding_distance_ratio: 0.1,
            bend_guide_valley: None,
            midline_score: false,
            score_dash: None,
        }
    }
}

fn check_open_unit(name: &str, value: f64) -> std::result::Result<(), GeometryError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            name,
            format!("must lie in (0, 1), got {value}"),
        ))
    }
}

impl BaseEdgeTabsSpec {
    pub fn validate(&self) -> std::result::Result<(), GeometryError> {
        if !(self.handle_angle > 0.0 && self.handle_angle < PI) {
            return Err(GeometryError::invalid_parameter(
                "handle_angle",
                format!("must lie in (0, π), got {}", self.handle_angle),
            ));
        }
        check_open_unit("hole_depth_to_tab_depth", self.hole_depth_to_tab_depth)?;
        check_open_unit("hole_width_ratio", self.hole_width_ratio)?;
        check_angle("hole_taper", self.hole_taper)?;
        if !(self.fin_width_to_hole_width > 0.0 && self.fin_width_to_hole_width < 1.0) {
            return Err(GeometryError::infeasible(format!(
                "fin must be narrower than the hole at its base, got width ratio {}",
                self.fin_width_to_hole_width
            )));
        }
        check_positive("fin_depth_to_tab_depth", self.fin_depth_to_tab_depth)?;
        check_angle("fin_flare_angle", self.fin_flare_angle)?;
        check_non_negative("rounding_distance_ratio", self.rounding_distance_ratio)?;
        if let Some(valley) = &self.bend_guide_valley {
            check_positive("bend_guide_valley.depth_ratio", valley.depth_ratio)?;
            if !(valley.theta > 0.0 && valley.theta < PI) {
                return Err(GeometryError::invalid_parameter(
                    "bend_guide_valley.theta",
                    format!("must lie in (0, π), got {}", valley.theta),
                ));
            }
        }
        if let Some(dash) = &self.score_dash {
            dash.validate()?;
        }
        Ok(())
    }
}

/// Both sides of a base-edge joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseEdgeTabs {
    pub hole: CutScore,
    pub fin: CutScore,
}

/// Notch corners `[v0, apex, v1]` along the handle top `h0 → h1`.
fn valley_corners(
    h0: Point,
    h1: Point,
    valley: &BendGuideValley,
    tab_depth: f64,
) -> Result<[Point; 3]> {
    let depth = valley.depth_ratio * tab_depth;
    let half_width = depth * (valley.theta / 2.0).tan();
    let top = h0.distance_to(&h1);
    if 2.0 * half_width >= top {
        return Err(GeometryError::infeasible(format!(
            "bend guide valley {} wide does not fit a handle top {top} wide",
            2.0 * half_width
        ))
        .into());
    }

    let offset = half_width / top;
    let (p, q) = parallel_line_points_at_distance(h0, h1, depth)?;
    Ok([
        h0.lerp(&h1, 0.5 - offset),
        p.lerp(&q, 0.5),
        h0.lerp(&h1, 0.5 + offset),
    ])
}

/// Hole and fin tabs for the base edge `start → end`, `tab_depth` deep.
pub fn base_edge_tabs(
    start: Point,
    end: Point,
    tab_depth: f64,
    spec: &BaseEdgeTabsSpec,
) -> Result<BaseEdgeTabs> {
    spec.validate()?;
    check_positive("tab_depth", tab_depth)?;
    let length = start.distance_to(&end);
    if length < EPSILON {
        return Err(GeometryError::DegenerateSegment.into());
    }

    let side_angle = spec.handle_angle - PI;
    let [h0, h1] = symmetric_hinge_plot_by_projection_distance(start, end, side_angle, -tab_depth)?;
    if projected_ratio(start, end, h0) >= projected_ratio(start, end, h1) {
        return Err(GeometryError::infeasible(format!(
            "handle sides meet before reaching depth {tab_depth}"
        ))
        .into());
    }

    // Hole, opening on the fold line
    let half_hole = spec.hole_width_ratio / 2.0;
    let m0 = start.lerp(&end, 0.5 - half_hole);
    let m1 = start.lerp(&end, 0.5 + half_hole);
    let hole_depth = tab_depth * spec.hole_depth_to_tab_depth;
    let hole_side_angle = -(FRAC_PI_2 + spec.hole_taper);
    let [k0, k1] =
        symmetric_hinge_plot_by_projection_distance(m0, m1, hole_side_angle, -hole_depth)?;
    if projected_ratio(m0, m1, k0) >= projected_ratio(m0, m1, k1) {
        return Err(GeometryError::infeasible(format!(
            "hole taper {} closes the hole before depth {hole_depth}",
            spec.hole_taper
        ))
        .into());
    }
    let [s0, s1] =
        symmetric_hinge_plot_by_projection_distance(start, end, side_angle, -hole_depth)?;
    if projected_ratio(start, end, m0) <= projected_ratio(start, end, s0)
        || projected_ratio(start, end, m1) >= projected_ratio(start, end, s1)
    {
        return Err(GeometryError::infeasible("hole does not fit inside the handle").into());
    }

    // Fin, flaring out from its base
    let half_fin = half_hole * spec.fin_width_to_hole_width;
    let f0 = start.lerp(&end, 0.5 - half_fin);
    let f1 = start.lerp(&end, 0.5 + half_fin);
    let fin_depth = tab_depth * spec.fin_depth_to_tab_depth;
    let [a0, a1] = symmetric_hinge_plot_by_projection_distance(
        f0,
        f1,
        -(FRAC_PI_2 - spec.fin_flare_angle),
        -fin_depth,
    )?;

    let rounding = clamp_rounding(
        tab_depth * spec.rounding_distance_ratio,
        &[
            (m0, k0),
            (k0, k1),
            (k1, m1),
            (m1, m0),
            (f0, a0),
            (a0, a1),
            (a1, f1),
            (f1, f0),
        ],
    );

    let mut handle_corners = vec![Corner::Sharp(start), Corner::Rounded(h0)];
    if let Some(valley) = &spec.bend_guide_valley {
        if (valley.depth_ratio + spec.hole_depth_to_tab_depth) >= 1.0 {
            return Err(GeometryError::infeasible("bend guide valley reaches the hole").into());
        }
        handle_corners.extend(valley_corners(h0, h1, valley, tab_depth)?.map(Corner::Sharp));
    }
    handle_corners.extend([Corner::Rounded(h1), Corner::Sharp(end)]);

    let mut hole_cut = rounded_corner_path(&handle_corners, rounding, false)?;
    hole_cut.concat(&rounded_corner_path(
        &[
            Corner::Sharp(m0),
            Corner::Rounded(k0),
            Corner::Rounded(k1),
            Corner::Sharp(m1),
        ],
        rounding,
        true,
    )?);

    let coverage = score_coverage(start, end, spec.score_dash.as_ref())?;
    let mouth = IntervalSet::new(vec![[0.5 - half_hole, 0.5 + half_hole]])?;
    let mut hole_score = ratio_path(start, end, &coverage.subtract(&mouth))?;
    if spec.midline_score {
        hole_score.concat(&midline_score(
            start,
            end,
            tab_depth,
            spec,
            [m0, m1],
            hole_depth,
        )?);
    }

    let fin_cut = rounded_corner_path(
        &[
            Corner::Sharp(start),
            Corner::Sharp(f0),
            Corner::Rounded(a0),
            Corner::Rounded(a1),
            Corner::Sharp(f1),
            Corner::Sharp(end),
        ],
        rounding,
        false,
    )?;
    let fin_score = ratio_path(f0, f1, &score_coverage(f0, f1, spec.score_dash.as_ref())?)?;

    debug!(
        length,
        tab_depth,
        rounding,
        valley = spec.bend_guide_valley.is_some(),
        "base edge tabs"
    );

    Ok(BaseEdgeTabs {
        hole: CutScore::new(hole_cut, hole_score),
        fin: CutScore::new(fin_cut, fin_score),
    })
}

/// Score across the handle at half depth, interrupted where the hole or the
/// valley cross it.
fn midline_score(
    start: Point,
    end: Point,
    tab_depth: f64,
    spec: &BaseEdgeTabsSpec,
    [m0, m1]: [Point; 2],
    hole_depth: f64,
) -> Result<PathData> {
    let mid_depth = tab_depth / 2.0;
    let [l0, l1] = symmetric_hinge_plot_by_projection_distance(
        start,
        end,
        spec.handle_angle - PI,
        -mid_depth,
    )?;
    let mut coverage = score_coverage(l0, l1, spec.score_dash.as_ref())?;

    if hole_depth > mid_depth {
        let [q0, q1] = symmetric_hinge_plot_by_projection_distance(
            m0,
            m1,
            -(FRAC_PI_2 + spec.hole_taper),
            -mid_depth,
        )?;
        let span = IntervalSet::new(vec![[
            projected_ratio(l0, l1, q0),
            projected_ratio(l0, l1, q1),
        ]])?;
        coverage = coverage.subtract(&span);
    }

    if let Some(valley) = &spec.bend_guide_valley {
        let reach = valley.depth_ratio * tab_depth - mid_depth;
        if reach > 0.0 {
            let half = reach * (valley.theta / 2.0).tan() / l0.distance_to(&l1);
            let centre = projected_ratio(l0, l1, start.lerp(&end, 0.5));
            coverage = coverage.subtract(&IntervalSet::new(vec![[centre - half, centre + half]])?);
        }
    }

    ratio_path(l0, l1, &coverage)
}
