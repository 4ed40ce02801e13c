//! Hinged-plot constructions
//!
//! Nearly every point of a tab profile is derived from an existing edge by
//! "hinging" away from one of its endpoints: rotate a fixed angle relative
//! to the edge direction and walk a fixed distance.
//!
//! ## Angle convention
//!
//! For a hinge on `p1 → p2`, angle zero points along the ray `p1 → p2`
//! continued beyond `p2`. Positive angles rotate counter-clockwise in a
//! y-up frame, so `θ = π` walks back toward `p1`, `θ = π/2` turns to the
//! left of the edge and `θ = -π/2` to its right. If `p1 == p2` the edge
//! direction falls back to the +x axis.

use std::f64::consts::FRAC_PI_2;

use crate::error::GeometryError;
use crate::point::{Point, EPSILON};

/// Plot a point `length` away from `p2`, rotated `theta` from the edge direction.
pub fn hinged_plot(p1: Point, p2: Point, theta: f64, length: f64) -> Result<Point, GeometryError> {
    (p2 + (p2 - p1).unit().rotate(theta) * length).validated()
}

/// Like [`hinged_plot`] with the length given as a ratio of `|p1 - p2|`.
pub fn hinged_plot_lerp(
    p1: Point,
    p2: Point,
    theta: f64,
    ratio: f64,
) -> Result<Point, GeometryError> {
    hinged_plot(p1, p2, theta, ratio * p1.distance_to(&p2))
}

pub fn line_lerp(start: Point, end: Point, t: f64) -> Result<Point, GeometryError> {
    start.lerp(&end, t).validated()
}

/// Endpoints of the line through `p1, p2` shifted perpendicular by `distance`.
///
/// Positive distances shift to the left of `p1 → p2`, negative to the right.
pub fn parallel_line_points_at_distance(
    p1: Point,
    p2: Point,
    distance: f64,
) -> Result<(Point, Point), GeometryError> {
    let offset = (p2 - p1).unit().rotate(FRAC_PI_2) * distance;
    Ok(((p1 + offset).validated()?, (p2 + offset).validated()?))
}

/// Intersection of the infinite lines `a1 a2` and `b1 b2`.
pub fn line_line_intersection(
    a1: Point,
    a2: Point,
    b1: Point,
    b2: Point,
) -> Result<Point, GeometryError> {
    let r = a2 - a1;
    let s = b2 - b1;
    let scale = r.length() * s.length();
    if scale < EPSILON {
        return Err(GeometryError::NoIntersection);
    }

    let denom = r.cross(&s);
    if denom.abs() <= EPSILON * scale {
        return Err(GeometryError::NoIntersection);
    }

    let t = (b1 - a1).cross(&s) / denom;
    (a1 + r * t).validated()
}

/// Point on the hinge ray at `angle` from `p2` lying `proj_distance` from the baseline.
///
/// The perpendicular distance is signed like
/// [`parallel_line_points_at_distance`]. Fails with `NoIntersection` when the
/// hinge ray runs parallel to the baseline.
pub fn hinged_plot_by_projection_distance(
    p1: Point,
    p2: Point,
    angle: f64,
    proj_distance: f64,
) -> Result<Point, GeometryError> {
    let ray_end = hinged_plot(p1, p2, angle, 1.0)?;
    let (o1, o2) = parallel_line_points_at_distance(p1, p2, proj_distance)?;
    line_line_intersection(p2, ray_end, o1, o2)
}

/// Mirrored hinge plots from both ends of `p1 → p2`, returned as `[near p1, near p2]`.
///
/// The pair is symmetric about the perpendicular bisector of the edge.
pub fn symmetric_hinge_plot(
    p1: Point,
    p2: Point,
    theta: f64,
    length: f64,
) -> Result<[Point; 2], GeometryError> {
    Ok([
        hinged_plot(p2, p1, -theta, length)?,
        hinged_plot(p1, p2, theta, length)?,
    ])
}

/// Mirrored [`hinged_plot_by_projection_distance`] pair, `[near p1, near p2]`.
pub fn symmetric_hinge_plot_by_projection_distance(
    p1: Point,
    p2: Point,
    theta: f64,
    proj_distance: f64,
) -> Result<[Point; 2], GeometryError> {
    Ok([
        hinged_plot_by_projection_distance(p2, p1, -theta, -proj_distance)?,
        hinged_plot_by_projection_distance(p1, p2, theta, proj_distance)?,
    ])
}

/// Angle opposite `base` in the triangle with the given side lengths.
pub fn triangle_apex_angle(base: f64, left: f64, right: f64) -> Result<f64, GeometryError> {
    if !(base > 0.0 && left > 0.0 && right > 0.0) {
        return Err(GeometryError::invalid_parameter(
            "edge lengths",
            "triangle edges must be positive",
        ));
    }
    if base >= left + right || left >= base + right || right >= base + left {
        return Err(GeometryError::infeasible(format!(
            "edges {base}, {left}, {right} violate the triangle inequality"
        )));
    }

    let cos = (left * left + right * right - base * base) / (2.0 * left * right);
    Ok(cos.clamp(-1.0, 1.0).acos())
}
