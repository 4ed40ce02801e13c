//! Rounded-corner paths
//!
//! Turns a polyline into a path whose marked vertices are replaced by cubic
//! fillets. The fillet never reaches past the midpoint of either adjacent
//! segment, so neighbouring fillets cannot overlap.

use papernet_core::{GeometryError, Point, Result};

use crate::path::PathData;

/// Share of the way from a tangent point to the vertex for both controls
const CONTROL_RATIO: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Corner {
    Sharp(Point),
    Rounded(Point),
}

impl Corner {
    pub fn point(&self) -> Point {
        match *self {
            Corner::Sharp(p) | Corner::Rounded(p) => p,
        }
    }

    pub fn is_rounded(&self) -> bool {
        matches!(self, Corner::Rounded(_))
    }
}

/// Largest usable rounding distance at `vertex` between `prev` and `next`.
pub fn clamped_rounding_distance(prev: Point, vertex: Point, next: Point, distance: f64) -> f64 {
    distance
        .min(prev.distance_to(&vertex) / 2.0)
        .min(next.distance_to(&vertex) / 2.0)
}

struct Fillet {
    entry: Point,
    ctrl1: Point,
    ctrl2: Point,
    exit: Point,
}

fn fillet(prev: Point, vertex: Point, next: Point, distance: f64) -> Option<Fillet> {
    let r = clamped_rounding_distance(prev, vertex, next, distance);
    if r <= 0.0 {
        return None;
    }
    let entry = vertex + (prev - vertex).unit() * r;
    let exit = vertex + (next - vertex).unit() * r;
    Some(Fillet {
        entry,
        ctrl1: entry.lerp(&vertex, CONTROL_RATIO),
        ctrl2: exit.lerp(&vertex, CONTROL_RATIO),
        exit,
    })
}

fn draw_corner(
    path: &mut PathData,
    prev: Point,
    corner: Corner,
    next: Point,
    distance: f64,
) -> Result<()> {
    let vertex = corner.point();
    match corner {
        Corner::Rounded(_) => match fillet(prev, vertex, next, distance) {
            Some(f) => {
                path.line_to(f.entry)?.cubic_bezier_to(f.ctrl1, f.ctrl2, f.exit)?;
            }
            None => {
                path.line_to(vertex)?;
            }
        },
        Corner::Sharp(_) => {
            path.line_to(vertex)?;
        }
    }
    Ok(())
}

/// Build a path through `corners`, filleting every [`Corner::Rounded`] vertex.
///
/// The end points of an open path are never rounded. A closed path treats the
/// corner list as cyclic and ends with a `Close`.
pub fn rounded_corner_path(corners: &[Corner], distance: f64, closed: bool) -> Result<PathData> {
    if corners.len() < 2 {
        return Err(GeometryError::invalid_parameter(
            "corners",
            "a rounded path needs at least two corners",
        )
        .into());
    }
    if !distance.is_finite() || distance < 0.0 {
        return Err(GeometryError::invalid_parameter(
            "distance",
            format!("rounding distance must be finite and non-negative, got {distance}"),
        )
        .into());
    }

    let n = corners.len();
    let mut path = PathData::new();

    if !closed {
        path.move_to(corners[0].point());
        for i in 1..n - 1 {
            draw_corner(
                &mut path,
                corners[i - 1].point(),
                corners[i],
                corners[i + 1].point(),
                distance,
            )?;
        }
        path.line_to(corners[n - 1].point())?;
        return Ok(path);
    }

    let first = corners[0];
    let before_first = corners[n - 1].point();
    let after_first = corners[1].point();
    let first_fillet = if first.is_rounded() {
        fillet(before_first, first.point(), after_first, distance)
    } else {
        None
    };

    match &first_fillet {
        Some(f) => path.move_to(f.exit),
        None => path.move_to(first.point()),
    };
    for i in 1..n {
        draw_corner(
            &mut path,
            corners[i - 1].point(),
            corners[i],
            corners[(i + 1) % n].point(),
            distance,
        )?;
    }
    if let Some(f) = first_fillet {
        path.line_to(f.entry)?
            .cubic_bezier_to(f.ctrl1, f.ctrl2, f.exit)?;
    }
    path.close()?;

    Ok(path)
}
