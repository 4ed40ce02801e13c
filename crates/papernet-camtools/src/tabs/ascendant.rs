//! Ascendant-edge tabs
//!
//! Joins the two edges that meet at a pyramid apex. The male side carries a
//! row of dovetail tabs: each narrows to a neck and widens again to a head
//! wider than its base. The female side carries tapered flaps on the same
//! intervals, which fold in and hold the heads.

use std::f64::consts::FRAC_PI_2;

use papernet_core::{
    line_line_intersection, parallel_line_points_at_distance, symmetric_hinge_plot,
    symmetric_hinge_plot_by_projection_distance, GeometryError, Point, Result, EPSILON,
};
use papernet_designer::{rounded_corner_path, Corner, PathData};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    check_angle, check_non_negative, check_positive, clamp_rounding, projected_ratio,
    score_coverage, CutScore,
};
use crate::dash::{ratio_path, DashSpec};
use crate::interval::{Interval, IntervalSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscendantEdgeTabsSpec {
    /// Number of male tabs along the edge
    pub tabs_count: usize,
    /// Tab depth as a fraction of the edge length
    pub tab_depth_to_traversal_length: f64,
    /// Depth of the neck as a fraction of the tab depth
    pub midpoint_depth_to_tab_depth: f64,
    /// Gap kept clear at each end of the edge, relative to the tab depth
    pub tab_start_gap_to_tab_depth: f64,
    /// Lean of the tab sides away from the edge normal, in radians
    pub tab_widening_angle: f64,
    /// Rounding distance relative to the tab depth
    pub tab_rounding_distance_ratio: f64,
    /// Depth of the female flaps relative to the tab depth
    pub female_depth_to_tab_depth: f64,
    /// Inward lean of the female flap sides, in radians
    pub female_taper_angle: f64,
    /// Dash for score lines; solid when absent
    pub score_dash: Option<DashSpec>,
}

impl Default for AscendantEdgeTabsSpec {
    fn default() -> Self {
        Self {
            tabs_count: 3,
            tab_depth_to_traversal_length: 0.08,
            midpoint_depth_to_tab_depth: 0.5,
            tab_start_gap_to_tab_depth: 0.5,
            tab_widening_angle: 15f64.to_radians(),
            tab_rounding_distance_ratio: 0.1,
            female_depth_to_tab_depth: 0.5,
            female_taper_angle: 20f64.to_radians(),
            score_dash: None,
        }
    }
}

impl AscendantEdgeTabsSpec {
    pub fn validate(&self) -> std::result::Result<(), GeometryError> {
        if self.tabs_count == 0 {
            return Err(GeometryError::invalid_parameter(
                "tabs_count",
                "at least one tab is required",
            ));
        }
        check_positive("tab_depth_to_traversal_length", self.tab_depth_to_traversal_length)?;
        if !(self.midpoint_depth_to_tab_depth > 0.0 && self.midpoint_depth_to_tab_depth < 1.0) {
            return Err(GeometryError::invalid_parameter(
                "midpoint_depth_to_tab_depth",
                format!("must lie in (0, 1), got {}", self.midpoint_depth_to_tab_depth),
            ));
        }
        check_non_negative("tab_start_gap_to_tab_depth", self.tab_start_gap_to_tab_depth)?;
        check_angle("tab_widening_angle", self.tab_widening_angle)?;
        check_non_negative("tab_rounding_distance_ratio", self.tab_rounding_distance_ratio)?;
        check_positive("female_depth_to_tab_depth", self.female_depth_to_tab_depth)?;
        check_angle("female_taper_angle", self.female_taper_angle)?;
        if let Some(dash) = &self.score_dash {
            dash.validate()?;
        }
        Ok(())
    }
}

/// Both sides of an ascendant-edge joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscendantEdgeTabs {
    pub male: CutScore,
    pub female: CutScore,
    /// Tab footprints as ratios of the edge
    pub tabs: IntervalSet,
}

/// Evenly spaced tab footprints with equal gaps kept at both ends.
fn tab_intervals(length: f64, depth: f64, spec: &AscendantEdgeTabsSpec) -> Result<IntervalSet> {
    let gap = depth * spec.tab_start_gap_to_tab_depth;
    let usable = length - 2.0 * gap;
    if usable <= EPSILON {
        return Err(GeometryError::infeasible(format!(
            "start gaps of {gap} leave no room for tabs on an edge of length {length}"
        ))
        .into());
    }

    let slot = usable / (2 * spec.tabs_count - 1) as f64;
    let intervals = (0..spec.tabs_count)
        .map(|i| {
            let from = gap + (2 * i) as f64 * slot;
            [from / length, (from + slot) / length]
        })
        .collect();
    Ok(IntervalSet::new(intervals)?)
}

/// One dovetail from `b0` to `b1`, returned with its two head corners.
fn male_profile(
    b0: Point,
    b1: Point,
    depth: f64,
    spec: &AscendantEdgeTabsSpec,
) -> Result<(PathData, [Point; 2])> {
    let widening = spec.tab_widening_angle;
    let neck_depth = depth * spec.midpoint_depth_to_tab_depth;

    // Necks lean in towards the tab centre, heads lean back out
    let [n0, n1] = symmetric_hinge_plot_by_projection_distance(
        b0,
        b1,
        -(FRAC_PI_2 + widening),
        -neck_depth,
    )?;
    if projected_ratio(b0, b1, n0) >= projected_ratio(b0, b1, n1) {
        return Err(GeometryError::infeasible(format!(
            "tab neck closes: widening angle {widening} is too steep for a tab {} wide",
            b0.distance_to(&b1)
        ))
        .into());
    }

    let [r0, r1] = symmetric_hinge_plot(b0, b1, -(FRAC_PI_2 - widening), 1.0)?;
    let (o0, o1) = parallel_line_points_at_distance(b0, b1, -depth)?;
    let h0 = line_line_intersection(n0, n0 + (r0 - b0), o0, o1)?;
    let h1 = line_line_intersection(n1, n1 + (r1 - b1), o0, o1)?;

    let rounding = clamp_rounding(
        depth * spec.tab_rounding_distance_ratio,
        &[(b0, n0), (n0, h0), (h0, h1), (h1, n1), (n1, b1)],
    );
    let path = rounded_corner_path(
        &[
            Corner::Sharp(b0),
            Corner::Rounded(n0),
            Corner::Rounded(h0),
            Corner::Rounded(h1),
            Corner::Rounded(n1),
            Corner::Sharp(b1),
        ],
        rounding,
        false,
    )?;
    Ok((path, [h0, h1]))
}

/// Heads are wider than their bases, so each must stay within the edge and
/// clear of the next one.
fn check_head_clearance(heads: &[Interval]) -> Result<()> {
    for (i, &[from, to]) in heads.iter().enumerate() {
        if from < -EPSILON || to > 1.0 + EPSILON {
            return Err(GeometryError::infeasible(format!(
                "dovetail head {i} spans [{from:.4}, {to:.4}] of the edge, past its ends"
            ))
            .into());
        }
    }
    for (i, pair) in heads.windows(2).enumerate() {
        if pair[0][1] >= pair[1][0] {
            return Err(GeometryError::infeasible(format!(
                "dovetail heads {i} and {} overlap; reduce the widening angle or tab count",
                i + 1
            ))
            .into());
        }
    }
    Ok(())
}

/// One tapered flap from `b0` to `b1`.
fn female_profile(
    b0: Point,
    b1: Point,
    depth: f64,
    spec: &AscendantEdgeTabsSpec,
) -> Result<PathData> {
    let taper = spec.female_taper_angle;
    let flap_depth = depth * spec.female_depth_to_tab_depth;
    let [t0, t1] = symmetric_hinge_plot_by_projection_distance(
        b0,
        b1,
        -(FRAC_PI_2 + taper),
        -flap_depth,
    )?;
    if projected_ratio(b0, b1, t0) >= projected_ratio(b0, b1, t1) {
        return Err(GeometryError::infeasible(format!(
            "female taper {taper} closes a flap {} wide",
            b0.distance_to(&b1)
        ))
        .into());
    }

    let rounding = clamp_rounding(
        flap_depth * spec.tab_rounding_distance_ratio,
        &[(b0, t0), (t0, t1), (t1, b1)],
    );
    rounded_corner_path(
        &[
            Corner::Sharp(b0),
            Corner::Rounded(t0),
            Corner::Rounded(t1),
            Corner::Sharp(b1),
        ],
        rounding,
        false,
    )
}

/// Run `start → end` through every profile, fused into a single subpath.
fn edge_cut(start: Point, end: Point, profiles: &[PathData]) -> Result<PathData> {
    let mut cut = PathData::new();
    cut.move_to(start);
    for profile in profiles {
        if let (Some(from), Some(current)) = (profile.start_point(), cut.current_point()) {
            if !from.approx_eq(&current, EPSILON) {
                cut.line_to(from)?;
            }
        }
        cut.fuse(profile)?;
    }
    if cut
        .current_point()
        .is_some_and(|current| !current.approx_eq(&end, EPSILON))
    {
        cut.line_to(end)?;
    }
    Ok(cut)
}

/// Male and female tabs for the edge `start → end`.
pub fn ascendant_edge_tabs(
    start: Point,
    end: Point,
    spec: &AscendantEdgeTabsSpec,
) -> Result<AscendantEdgeTabs> {
    spec.validate()?;
    let length = start.distance_to(&end);
    if length < EPSILON {
        return Err(GeometryError::DegenerateSegment.into());
    }
    let depth = length * spec.tab_depth_to_traversal_length;

    let tabs = tab_intervals(length, depth, spec)?;
    let gaps = IntervalSet::unit().subtract(&tabs);

    let mut male_profiles = Vec::with_capacity(tabs.len());
    let mut female_profiles = Vec::with_capacity(tabs.len());
    let mut heads = Vec::with_capacity(tabs.len());
    for &[from, to] in &tabs {
        let b0 = start.lerp(&end, from);
        let b1 = start.lerp(&end, to);
        let (profile, [h0, h1]) = male_profile(b0, b1, depth, spec)?;
        male_profiles.push(profile);
        heads.push([projected_ratio(start, end, h0), projected_ratio(start, end, h1)]);
        female_profiles.push(female_profile(b0, b1, depth, spec)?);
    }
    check_head_clearance(&heads)?;

    let coverage = score_coverage(start, end, spec.score_dash.as_ref())?;
    let male = CutScore::new(
        edge_cut(start, end, &male_profiles)?,
        ratio_path(start, end, &coverage.subtract(&tabs))?,
    );
    let female = CutScore::new(
        edge_cut(start, end, &female_profiles)?,
        ratio_path(start, end, &coverage.subtract(&gaps))?,
    );

    debug!(
        length,
        depth,
        tabs = tabs.len(),
        male_commands = male.cut.len(),
        female_commands = female.cut.len(),
        "ascendant edge tabs"
    );

    Ok(AscendantEdgeTabs { male, female, tabs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use papernet_designer::PathCommand;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    fn spec() -> AscendantEdgeTabsSpec {
        AscendantEdgeTabsSpec {
            tabs_count: 2,
            tab_depth_to_traversal_length: 0.1,
            midpoint_depth_to_tab_depth: 0.5,
            tab_start_gap_to_tab_depth: 1.0,
            tab_widening_angle: 0.2,
            tab_rounding_distance_ratio: 0.1,
            female_depth_to_tab_depth: 0.6,
            female_taper_angle: 0.3,
            score_dash: None,
        }
    }

    #[test]
    fn test_tab_layout() {
        // depth 10, gaps of 10 at each end, three slots of 80/3
        let tabs = tab_intervals(100.0, 10.0, &spec()).unwrap();
        assert_eq!(tabs.len(), 2);
        let [a, b] = tabs.as_slice()[0];
        assert!((a - 0.1).abs() < 1e-12);
        assert!((b - (0.1 + 0.8 / 3.0)).abs() < 1e-12);
        let [_, last] = tabs.as_slice()[1];
        assert!((last - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_zero_tabs_is_an_error() {
        let spec = AscendantEdgeTabsSpec {
            tabs_count: 0,
            ..spec()
        };
        let err = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap_err();
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_male_tabs_sit_on_the_right() {
        let tabs = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec()).unwrap();
        let lowest = tabs
            .male
            .cut
            .iter()
            .filter_map(PathCommand::to)
            .map(|p| p.y())
            .fold(f64::INFINITY, f64::min);
        assert!((lowest + 10.0).abs() < 1.0);
        assert!(tabs.male.cut.iter().filter_map(PathCommand::to).all(|p| p.y() <= 1e-9));
    }

    #[test]
    fn test_cut_is_one_continuous_subpath() {
        let tabs = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec()).unwrap();
        assert_eq!(tabs.male.cut.subpaths().len(), 1);
        assert_eq!(tabs.female.cut.subpaths().len(), 1);
        assert_eq!(tabs.male.cut.start_point(), Some(pt(0.0, 0.0)));
        assert_eq!(tabs.male.cut.current_point(), Some(pt(100.0, 0.0)));
    }

    #[test]
    fn test_heads_are_wider_than_bases() {
        let spec = AscendantEdgeTabsSpec {
            midpoint_depth_to_tab_depth: 0.3,
            tab_rounding_distance_ratio: 0.0,
            ..spec()
        };
        let (profile, heads) = male_profile(pt(0.0, 0.0), pt(20.0, 0.0), 10.0, &spec).unwrap();
        // neck at depth 3, head at 10, both sides leaning by the widening angle
        assert!(heads[0].approx_eq(&pt(-4.0 * 0.2f64.tan(), -10.0), 1e-9));
        assert!(heads[1].approx_eq(&pt(20.0 + 4.0 * 0.2f64.tan(), -10.0), 1e-9));
        let xs: Vec<f64> = profile
            .iter()
            .filter_map(PathCommand::to)
            .filter(|p| p.y() < -9.9)
            .map(|p| p.x())
            .collect();
        assert_eq!(xs.len(), 2);
        assert!(xs[0] < 0.0);
        assert!(xs[1] > 20.0);
    }

    #[test]
    fn test_wide_heads_colliding_fail() {
        // heads overhang their bases by 0.8 * 8 * tan 40° ≈ 5.4, more than
        // both the end gap of 4 and the spacing between neighbouring tabs
        let spec = AscendantEdgeTabsSpec {
            tabs_count: 6,
            midpoint_depth_to_tab_depth: 0.1,
            tab_widening_angle: 40f64.to_radians(),
            ..AscendantEdgeTabsSpec::default()
        };
        let err = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap_err();
        assert!(err.is_geometry_error());
        assert!(err.to_string().contains("head"));
    }

    #[test]
    fn test_head_clearance() {
        assert!(check_head_clearance(&[[0.1, 0.3], [0.4, 0.6]]).is_ok());
        assert!(check_head_clearance(&[[-0.01, 0.3]]).is_err());
        assert!(check_head_clearance(&[[0.7, 1.02]]).is_err());
        assert!(check_head_clearance(&[[0.1, 0.45], [0.4, 0.6]]).is_err());
    }

    #[test]
    fn test_steep_widening_closes_neck() {
        let spec = AscendantEdgeTabsSpec {
            tabs_count: 12,
            tab_widening_angle: 1.5,
            ..spec()
        };
        let err = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap_err();
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_scores_avoid_their_own_footprints() {
        let tabs = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec()).unwrap();
        let midpoint_ratio = |stroke: &PathData| {
            let a = stroke.start_point().unwrap();
            let b = stroke.current_point().unwrap();
            (a.x() + b.x()) / 200.0
        };

        let male = tabs.male.score.subpaths();
        assert_eq!(male.len(), 3);
        assert!(male.iter().all(|s| !tabs.tabs.contains(midpoint_ratio(s))));

        let female = tabs.female.score.subpaths();
        assert_eq!(female.len(), tabs.tabs.len());
        assert!(female.iter().all(|s| tabs.tabs.contains(midpoint_ratio(s))));
    }
}
