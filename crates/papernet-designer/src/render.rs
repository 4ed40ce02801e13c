//! Lyon bridge
//!
//! Converts [`PathData`] into a `lyon` path so that curves can be flattened
//! for measuring and rendering.

use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use papernet_core::Point;

use crate::arc::{arc_to_cubics, ArcApproximation};
use crate::command::PathCommand;
use crate::path::PathData;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

fn lyon_point(p: Point) -> lyon::math::Point {
    point(p.x() as f32, p.y() as f32)
}

fn reflect(ctrl: Point, about: Point) -> Point {
    about * 2.0 - ctrl
}

impl PathData {
    /// Build the equivalent `lyon` path, expanding arcs and smooth shorthands.
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder();
        let mut subpath_active = false;
        let mut current = Point::ORIGIN;
        let mut subpath_start = Point::ORIGIN;
        let mut prev_cubic_ctrl: Option<Point> = None;
        let mut prev_quad_ctrl: Option<Point> = None;

        for command in self.iter() {
            let opens_subpath = !matches!(command, PathCommand::Move { .. } | PathCommand::Close);
            if !subpath_active && opens_subpath {
                builder.begin(lyon_point(current));
                subpath_active = true;
            }
            let (mut next_cubic, mut next_quad) = (None, None);

            match *command {
                PathCommand::Move { to } => {
                    if subpath_active {
                        builder.end(false);
                    }
                    builder.begin(lyon_point(to));
                    subpath_active = true;
                    subpath_start = to;
                }
                PathCommand::Line { to } => {
                    builder.line_to(lyon_point(to));
                }
                PathCommand::CubicBezier { ctrl1, ctrl2, to } => {
                    builder.cubic_bezier_to(lyon_point(ctrl1), lyon_point(ctrl2), lyon_point(to));
                    next_cubic = Some(ctrl2);
                }
                PathCommand::SmoothCubicBezier { ctrl2, to } => {
                    let ctrl1 = prev_cubic_ctrl.map_or(current, |c| reflect(c, current));
                    builder.cubic_bezier_to(lyon_point(ctrl1), lyon_point(ctrl2), lyon_point(to));
                    next_cubic = Some(ctrl2);
                }
                PathCommand::QuadraticBezier { ctrl1, to } => {
                    builder.quadratic_bezier_to(lyon_point(ctrl1), lyon_point(to));
                    next_quad = Some(ctrl1);
                }
                PathCommand::SmoothQuadraticBezier { to } => {
                    let ctrl = prev_quad_ctrl.map_or(current, |c| reflect(c, current));
                    builder.quadratic_bezier_to(lyon_point(ctrl), lyon_point(to));
                    next_quad = Some(ctrl);
                }
                PathCommand::EllipticalArc {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                } => match arc_to_cubics(current, rx, ry, x_axis_rotation, large_arc, sweep, to) {
                    ArcApproximation::Empty => {}
                    ArcApproximation::Line => {
                        builder.line_to(lyon_point(to));
                    }
                    ArcApproximation::Cubics(segments) => {
                        for (ctrl1, ctrl2, end) in segments {
                            builder.cubic_bezier_to(
                                lyon_point(ctrl1),
                                lyon_point(ctrl2),
                                lyon_point(end),
                            );
                        }
                    }
                },
                PathCommand::Close => {
                    if subpath_active {
                        builder.close();
                        subpath_active = false;
                    }
                    current = subpath_start;
                }
            }

            if let Some(to) = command.to() {
                current = to;
            }
            prev_cubic_ctrl = next_cubic;
            prev_quad_ctrl = next_quad;
        }

        if subpath_active {
            builder.end(false);
        }

        builder.build()
    }

    /// Bounding box of the path flattened to `tolerance`, `None` when empty.
    pub fn bounds(&self, tolerance: f32) -> Option<Bounds> {
        let path = self.to_lyon_path();
        let mut bounds: Option<Bounds> = None;
        for event in path.iter().flattened(tolerance) {
            let at = match event {
                lyon::path::Event::Begin { at } => at,
                lyon::path::Event::Line { to, .. } => to,
                _ => continue,
            };
            let (x, y) = (at.x as f64, at.y as f64);
            let single = Bounds {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            };
            bounds = Some(bounds.map_or(single, |b| b.union(&single)));
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_polyline() {
        let path: PathData = "M 0 0 L 10 0 L 10 5 Z M 20 -3 L 21 -3".parse().unwrap();
        let bb = path.bounds(0.1).unwrap();
        assert_eq!((bb.min_x, bb.min_y, bb.max_x, bb.max_y), (0.0, -3.0, 21.0, 5.0));
    }

    #[test]
    fn test_arc_bounds_follow_the_curve() {
        let path: PathData = "M 0 0 A 5 5 0 0 0 10 0".parse().unwrap();
        let bb = path.bounds(0.01).unwrap();
        assert!((bb.height() - 5.0).abs() < 0.05);
        assert!((bb.width() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_path_has_no_bounds() {
        assert_eq!(PathData::new().bounds(0.1), None);
    }

    #[test]
    fn test_lyon_path_event_count() {
        let path: PathData = "M 0 0 L 1 0 L 1 1 Z".parse().unwrap();
        let lyon_path = path.to_lyon_path();
        // begin, two lines, end
        assert_eq!(lyon_path.iter().count(), 4);
    }
}
