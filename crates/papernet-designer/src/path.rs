//! Path command model
//!
//! `PathData` is an append-only buffer of [`PathCommand`]s with fluent,
//! validated builders. The buffer is owned outright: cloning or
//! concatenating always copies commands, so two paths never share storage.
//!
//! ## Invariants
//!
//! - The first command, and any command following a `Close`, is a `Move`
//! - A smooth cubic follows a cubic; a smooth quadratic follows a quadratic
//!
//! ## Example
//!
//! ```rust
//! use papernet_core::Point;
//! use papernet_designer::PathData;
//!
//! # fn main() -> Result<(), papernet_core::PathError> {
//! let mut path = PathData::new();
//! path.move_to(Point::new(0.0, 0.0).unwrap())
//!     .line_to(Point::new(10.0, 0.0).unwrap())?
//!     .close()?;
//! assert_eq!(path.to_wire_format(), "M 0 0 L 10 0 Z");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use nalgebra::{Affine2, Matrix3, Point2};
use papernet_core::{GeometryError, PathError, Point, EPSILON};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::arc::{arc_to_cubics, ArcApproximation};
use crate::command::{BezierFamily, PathCommand};
use crate::wire;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

/// Build an affine map from SVG `matrix(a b c d e f)` coefficients.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
pub fn affine(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(a, c, e, b, d, f, 0.0, 0.0, 1.0))
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }

    fn needs_move(&self) -> bool {
        matches!(self.commands.last(), None | Some(PathCommand::Close))
    }

    fn last_family(&self) -> Option<BezierFamily> {
        self.commands.last().and_then(PathCommand::family)
    }

    /// Check `command` against the sequencing invariants without appending it.
    pub fn validate_next(&self, command: &PathCommand) -> Result<(), PathError> {
        let letter = command.letter();
        if let PathCommand::EllipticalArc {
            rx,
            ry,
            x_axis_rotation,
            ..
        } = command
        {
            if !(rx.is_finite() && ry.is_finite() && x_axis_rotation.is_finite()) {
                return Err(PathError::malformed(letter, "arc parameters must be finite"));
            }
        }
        if letter == 'M' {
            return Ok(());
        }
        if self.needs_move() {
            let reason = if self.is_empty() {
                "a path must start with a move"
            } else {
                "a closed subpath must be followed by a move"
            };
            return Err(PathError::malformed(letter, reason));
        }
        if let Some(required) = command.required_family() {
            if self.last_family() != Some(required) {
                let reason = match required {
                    BezierFamily::Cubic => "smooth cubic must follow a cubic bezier",
                    BezierFamily::Quadratic => "smooth quadratic must follow a quadratic bezier",
                };
                return Err(PathError::malformed(letter, reason));
            }
        }
        Ok(())
    }

    /// Validate and append one command.
    pub fn push(&mut self, command: PathCommand) -> Result<&mut Self, PathError> {
        self.validate_next(&command)?;
        self.commands.push(command);
        Ok(self)
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.commands.push(PathCommand::Move { to });
        self
    }

    pub fn line_to(&mut self, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::Line { to })
    }

    pub fn cubic_bezier_to(
        &mut self,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    ) -> Result<&mut Self, PathError> {
        self.push(PathCommand::CubicBezier { ctrl1, ctrl2, to })
    }

    pub fn smooth_cubic_bezier_to(
        &mut self,
        ctrl2: Point,
        to: Point,
    ) -> Result<&mut Self, PathError> {
        self.push(PathCommand::SmoothCubicBezier { ctrl2, to })
    }

    pub fn quadratic_bezier_to(&mut self, ctrl1: Point, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::QuadraticBezier { ctrl1, to })
    }

    pub fn smooth_quadratic_bezier_to(&mut self, to: Point) -> Result<&mut Self, PathError> {
        self.push(PathCommand::SmoothQuadraticBezier { to })
    }

    /// Append an elliptical arc; `x_axis_rotation` is in degrees.
    pub fn elliptical_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> Result<&mut Self, PathError> {
        self.push(PathCommand::EllipticalArc {
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            to,
        })
    }

    pub fn close(&mut self) -> Result<&mut Self, PathError> {
        self.push(PathCommand::Close)
    }

    /// Append a copy of every command of `other`.
    pub fn concat(&mut self, other: &PathData) -> &mut Self {
        self.commands.extend_from_slice(&other.commands);
        self
    }

    /// Validate and append a run of commands, e.g. one produced by [`PathData::slice`].
    pub fn append_commands(&mut self, commands: &[PathCommand]) -> Result<&mut Self, PathError> {
        for command in commands {
            self.push(*command)?;
        }
        Ok(self)
    }

    /// Commands in `range`, clamped to the buffer length.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> &[PathCommand] {
        let len = self.commands.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        &self.commands[start..end]
    }

    /// Join `other` onto the end of this path.
    ///
    /// When `other` begins where this path currently ends, its leading move is
    /// dropped so the two pieces form one continuous subpath. Otherwise the
    /// commands are appended as-is.
    pub fn fuse(&mut self, other: &PathData) -> Result<&mut Self, PathError> {
        let continues = match (self.open_end_point(), other.commands.first()) {
            (Some(end), Some(PathCommand::Move { to })) => end.approx_eq(to, 1e-6),
            _ => false,
        };
        if continues {
            self.append_commands(other.slice(1..))
        } else {
            Ok(self.concat(other))
        }
    }

    /// Split into one path per subpath.
    pub fn subpaths(&self) -> Vec<PathData> {
        let mut result: Vec<PathData> = Vec::new();
        for command in &self.commands {
            if matches!(command, PathCommand::Move { .. }) || result.is_empty() {
                result.push(PathData {
                    commands: vec![*command],
                });
            } else if let Some(current) = result.last_mut() {
                current.commands.push(*command);
            }
        }
        result
    }

    pub fn start_point(&self) -> Option<Point> {
        self.commands.first().and_then(PathCommand::to)
    }

    /// Current pen position: the last destination, or the subpath start after a close.
    pub fn current_point(&self) -> Option<Point> {
        let mut subpath_start = None;
        let mut current = None;
        for command in &self.commands {
            match command {
                PathCommand::Move { to } => {
                    subpath_start = Some(*to);
                    current = Some(*to);
                }
                PathCommand::Close => current = subpath_start,
                other => current = other.to(),
            }
        }
        current
    }

    /// End point of an unclosed final subpath.
    fn open_end_point(&self) -> Option<Point> {
        if self.needs_move() {
            None
        } else {
            self.current_point()
        }
    }

    /// Map every point operand through `transform`.
    ///
    /// Elliptical arcs are expanded into cubic Beziers first, since an affine
    /// image of an arc is not generally expressible with the same operands.
    /// The expansion is permanent.
    pub fn transform(&self, transform: &Affine2<f64>) -> Result<PathData, GeometryError> {
        let map = |p: Point| -> Result<Point, GeometryError> {
            let mapped = transform.transform_point(&Point2::new(p.x(), p.y()));
            Point::new(mapped.x, mapped.y)
        };

        let mut commands = Vec::with_capacity(self.commands.len());
        let mut current = Point::ORIGIN;
        let mut subpath_start = Point::ORIGIN;
        for command in &self.commands {
            match *command {
                PathCommand::EllipticalArc {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    match arc_to_cubics(current, rx, ry, x_axis_rotation, large_arc, sweep, to) {
                        ArcApproximation::Empty => {}
                        ArcApproximation::Line => commands.push(PathCommand::Line { to: map(to)? }),
                        ArcApproximation::Cubics(segments) => {
                            for (ctrl1, ctrl2, end) in segments {
                                commands.push(PathCommand::CubicBezier {
                                    ctrl1: map(ctrl1)?,
                                    ctrl2: map(ctrl2)?,
                                    to: map(end)?,
                                });
                            }
                        }
                    }
                    current = to;
                }
                PathCommand::Close => {
                    commands.push(PathCommand::Close);
                    current = subpath_start;
                }
                other => {
                    let mut failure = None;
                    let mapped = other.map_points(|p| match map(p) {
                        Ok(q) => q,
                        Err(err) => {
                            failure.get_or_insert(err);
                            p
                        }
                    });
                    if let Some(err) = failure {
                        return Err(err);
                    }
                    commands.push(mapped);
                    if let PathCommand::Move { to } = other {
                        subpath_start = to;
                    }
                    if let Some(to) = other.to() {
                        current = to;
                    }
                }
            }
        }

        Ok(PathData { commands })
    }

    /// Serialise to the wire format, e.g. `M 0 0 L 10 0 Z`.
    pub fn to_wire_format(&self) -> String {
        wire::format_commands(&self.commands)
    }

    /// Parse wire-format text, normalising relative and shorthand forms.
    pub fn from_wire_format(text: &str) -> Result<PathData, PathError> {
        wire::parse(text)
    }

    /// Whether both paths visit the same points within `tolerance`.
    pub fn approx_eq(&self, other: &PathData, tolerance: f64) -> bool {
        self.commands.len() == other.commands.len()
            && self
                .commands
                .iter()
                .zip(&other.commands)
                .all(|(a, b)| commands_approx_eq(a, b, tolerance))
    }
}

fn commands_approx_eq(a: &PathCommand, b: &PathCommand, tolerance: f64) -> bool {
    if a.letter() != b.letter() {
        return false;
    }
    if let (
        PathCommand::EllipticalArc {
            rx: rx1,
            ry: ry1,
            x_axis_rotation: rot1,
            large_arc: l1,
            sweep: s1,
            ..
        },
        PathCommand::EllipticalArc {
            rx: rx2,
            ry: ry2,
            x_axis_rotation: rot2,
            large_arc: l2,
            sweep: s2,
            ..
        },
    ) = (a, b)
    {
        if (rx1 - rx2).abs() > tolerance
            || (ry1 - ry2).abs() > tolerance
            || (rot1 - rot2).abs() > tolerance
            || l1 != l2
            || s1 != s2
        {
            return false;
        }
    }
    a.points()
        .iter()
        .zip(b.points().iter())
        .all(|(p, q)| p.approx_eq(q, tolerance.max(EPSILON)))
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_format())
    }
}

impl FromStr for PathData {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathData::from_wire_format(s)
    }
}

impl Serialize for PathData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_wire_format())
    }
}

impl<'de> Deserialize<'de> for PathData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PathData::from_wire_format(&s).map_err(serde::de::Error::custom)
    }
}
