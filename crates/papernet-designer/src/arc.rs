//! Elliptical arc expansion
//!
//! Converts the endpoint parameterisation of an SVG arc into cubic Bezier
//! segments of at most 90 degrees each. Arcs are not preserved under affine
//! maps, so transformed and rendered paths go through here first.

use std::f64::consts::{FRAC_PI_2, TAU};

use papernet_core::{Point, EPSILON};
use smallvec::SmallVec;

/// `(ctrl1, ctrl2, to)` of one cubic segment
pub type CubicSegment = (Point, Point, Point);

#[derive(Debug, Clone, PartialEq)]
pub enum ArcApproximation {
    /// Endpoints coincide; the arc draws nothing
    Empty,
    /// A zero radius degenerates the arc to a straight line
    Line,
    Cubics(SmallVec<[CubicSegment; 4]>),
}

fn angle_between(u: (f64, f64), v: (f64, f64)) -> f64 {
    let dot = u.0 * v.0 + u.1 * v.1;
    let det = u.0 * v.1 - u.1 * v.0;
    det.atan2(dot)
}

struct Ellipse {
    center: Point,
    /// Rotated x semi-axis, length rx
    axis_x: Point,
    /// Rotated y semi-axis, length ry
    axis_y: Point,
}

impl Ellipse {
    // center + R(phi) * [rx*u; ry*v]
    fn point(&self, u: f64, v: f64) -> Point {
        self.center + self.axis_x * u + self.axis_y * v
    }
}

/// Expand the arc from `from` to `to` into cubic segments.
///
/// `x_axis_rotation` is in degrees. Radii too small to span the endpoints
/// are scaled up as the SVG implementation notes prescribe. Non-finite radii
/// or rotation fall back to a straight line.
#[allow(clippy::too_many_arguments)]
pub fn arc_to_cubics(
    from: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> ArcApproximation {
    if from.approx_eq(&to, EPSILON) {
        return ArcApproximation::Empty;
    }
    if rx.abs() < EPSILON || ry.abs() < EPSILON {
        return ArcApproximation::Line;
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let (x1, y1) = (from.x(), from.y());
    let (x2, y2) = (to.x(), to.y());

    let phi = x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: Compute (x1', y1')
    let dx2 = (x1 - x2) / 2.0;
    let dy2 = (y1 - y2) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: Ensure radii are large enough
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    // Step 3: Compute (cx', cy')
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let denom = rx2 * y1p2 + ry2 * x1p2;
    if denom.abs() < EPSILON {
        return ArcApproximation::Line;
    }

    // Clamp numeric noise when the radii were just scaled up
    let numer = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.0);
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    // Step 4: Compute (cx, cy)
    let (Ok(cx), Ok(cy), Ok(axis_x), Ok(axis_y)) = (
        Point::from_polar(phi, cxp),
        Point::from_polar(phi + FRAC_PI_2, cyp),
        Point::from_polar(phi, rx),
        Point::from_polar(phi + FRAC_PI_2, ry),
    ) else {
        return ArcApproximation::Line;
    };
    let ellipse = Ellipse {
        center: from.lerp(&to, 0.5) + cx + cy,
        axis_x,
        axis_y,
    };

    // Step 5: Angles
    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let mut theta = angle_between((1.0, 0.0), u);
    let mut delta = angle_between(u, v);
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    // Step 6: Split into <= 90deg segments
    let segment_count = ((delta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let delta_seg = delta / segment_count as f64;
    let k = 4.0 / 3.0 * (delta_seg / 4.0).tan();

    let mut cubics = SmallVec::new();
    for index in 0..segment_count {
        let t0 = theta;
        let t1 = theta + delta_seg;
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();

        let ctrl1 = ellipse.point(c0 - k * s0, s0 + k * c0);
        let ctrl2 = ellipse.point(c1 + k * s1, s1 - k * c1);
        // Land exactly on the requested endpoint
        let end = if index + 1 == segment_count {
            to
        } else {
            ellipse.point(c1, s1)
        };

        cubics.push((ctrl1, ctrl2, end));
        theta = t1;
    }

    ArcApproximation::Cubics(cubics)
}
