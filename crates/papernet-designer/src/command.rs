//! Path commands
//!
//! One variant per drawing instruction. Every destination is absolute; the
//! relative forms of the wire format are resolved while parsing.

use papernet_core::Point;
use smallvec::{smallvec, SmallVec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    Move {
        to: Point,
    },
    Line {
        to: Point,
    },
    CubicBezier {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// First control point is the reflection of the previous cubic's second one
    SmoothCubicBezier {
        ctrl2: Point,
        to: Point,
    },
    QuadraticBezier {
        ctrl1: Point,
        to: Point,
    },
    /// Control point is the reflection of the previous quadratic's one
    SmoothQuadraticBezier {
        to: Point,
    },
    EllipticalArc {
        rx: f64,
        ry: f64,
        /// Rotation of the ellipse x axis, in degrees
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Commands that a smooth continuation may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezierFamily {
    Cubic,
    Quadratic,
}

impl PathCommand {
    /// Upper-case wire-format letter for this command.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::Move { .. } => 'M',
            PathCommand::Line { .. } => 'L',
            PathCommand::CubicBezier { .. } => 'C',
            PathCommand::SmoothCubicBezier { .. } => 'S',
            PathCommand::QuadraticBezier { .. } => 'Q',
            PathCommand::SmoothQuadraticBezier { .. } => 'T',
            PathCommand::EllipticalArc { .. } => 'A',
            PathCommand::Close => 'Z',
        }
    }

    /// Destination point, `None` for `Close`.
    pub fn to(&self) -> Option<Point> {
        match *self {
            PathCommand::Move { to }
            | PathCommand::Line { to }
            | PathCommand::CubicBezier { to, .. }
            | PathCommand::SmoothCubicBezier { to, .. }
            | PathCommand::QuadraticBezier { to, .. }
            | PathCommand::SmoothQuadraticBezier { to }
            | PathCommand::EllipticalArc { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    /// Every point operand in wire order.
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match *self {
            PathCommand::Move { to }
            | PathCommand::Line { to }
            | PathCommand::SmoothQuadraticBezier { to }
            | PathCommand::EllipticalArc { to, .. } => smallvec![to],
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => smallvec![ctrl1, ctrl2, to],
            PathCommand::SmoothCubicBezier { ctrl2, to } => smallvec![ctrl2, to],
            PathCommand::QuadraticBezier { ctrl1, to } => smallvec![ctrl1, to],
            PathCommand::Close => SmallVec::new(),
        }
    }

    pub fn family(&self) -> Option<BezierFamily> {
        match self {
            PathCommand::CubicBezier { .. } | PathCommand::SmoothCubicBezier { .. } => {
                Some(BezierFamily::Cubic)
            }
            PathCommand::QuadraticBezier { .. } | PathCommand::SmoothQuadraticBezier { .. } => {
                Some(BezierFamily::Quadratic)
            }
            _ => None,
        }
    }

    /// Family a smooth continuation requires of its predecessor.
    pub fn required_family(&self) -> Option<BezierFamily> {
        match self {
            PathCommand::SmoothCubicBezier { .. } => Some(BezierFamily::Cubic),
            PathCommand::SmoothQuadraticBezier { .. } => Some(BezierFamily::Quadratic),
            _ => None,
        }
    }

    /// Apply `f` to every point operand. Arc radii are left untouched.
    pub fn map_points<F>(&self, mut f: F) -> PathCommand
    where
        F: FnMut(Point) -> Point,
    {
        match *self {
            PathCommand::Move { to } => PathCommand::Move { to: f(to) },
            PathCommand::Line { to } => PathCommand::Line { to: f(to) },
            PathCommand::CubicBezier { ctrl1, ctrl2, to } => PathCommand::CubicBezier {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathCommand::SmoothCubicBezier { ctrl2, to } => PathCommand::SmoothCubicBezier {
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathCommand::QuadraticBezier { ctrl1, to } => PathCommand::QuadraticBezier {
                ctrl1: f(ctrl1),
                to: f(to),
            },
            PathCommand::SmoothQuadraticBezier { to } => {
                PathCommand::SmoothQuadraticBezier { to: f(to) }
            }
            PathCommand::EllipticalArc {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => PathCommand::EllipticalArc {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to: f(to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}
