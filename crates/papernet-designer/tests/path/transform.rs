use std::f64::consts::PI;

use papernet_core::Point;
use papernet_designer::{affine, PathCommand, PathData};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

#[test]
fn test_translate_and_scale() {
    let path: PathData = "M 0 0 L 10 0 C 10 5 5 10 0 10 Z".parse().unwrap();
    let scaled = path.transform(&affine(2.0, 0.0, 0.0, 2.0, 1.0, -1.0)).unwrap();
    assert_eq!(scaled.to_wire_format(), "M 1 -1 L 21 -1 C 21 9 11 19 1 19 Z");
}

#[test]
fn test_mirror_flips_y() {
    let path: PathData = "M 1 2 Q 3 4 5 6".parse().unwrap();
    let mirrored = path.transform(&affine(1.0, 0.0, 0.0, -1.0, 0.0, 0.0)).unwrap();
    assert_eq!(mirrored.to_wire_format(), "M 1 -2 Q 3 -4 5 -6");
}

#[test]
fn test_arc_becomes_cubics_under_rotation() {
    let path: PathData = "M 0 0 A 5 5 0 1 1 10 0 L 10 -4".parse().unwrap();
    let (s, c) = (PI / 6.0).sin_cos();
    let rotated = path.transform(&affine(c, s, -s, c, 0.0, 0.0)).unwrap();

    let cubic_count = rotated
        .iter()
        .filter(|cmd| matches!(cmd, PathCommand::CubicBezier { .. }))
        .count();
    assert!(cubic_count >= 2);
    assert!(!rotated
        .iter()
        .any(|cmd| matches!(cmd, PathCommand::EllipticalArc { .. })));

    // The arc end point is rotated like any other point
    let arc_end = rotated.commands()[rotated.len() - 2].to().unwrap();
    assert!(arc_end.approx_eq(&pt(10.0 * c, 10.0 * s), 1e-9));
    let line_end = rotated.current_point().unwrap();
    assert!(line_end.approx_eq(&pt(10.0 * c + 4.0 * s, 10.0 * s - 4.0 * c), 1e-9));
}

#[test]
fn test_transform_keeps_original_untouched() {
    let path: PathData = "M 0 0 A 2 2 0 0 1 4 0".parse().unwrap();
    let _ = path.transform(&affine(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)).unwrap();
    assert!(matches!(
        path.commands()[1],
        PathCommand::EllipticalArc { .. }
    ));
}

#[test]
fn test_degenerate_arcs_under_transform() {
    let path: PathData = "M 0 0 A 0 5 0 0 1 4 0 A 3 3 0 0 1 4 0".parse().unwrap();
    let moved = path.transform(&affine(1.0, 0.0, 0.0, 1.0, 1.0, 1.0)).unwrap();
    assert_eq!(moved.to_wire_format(), "M 1 1 L 5 1");
}

#[test]
fn test_non_finite_transform_fails() {
    let path: PathData = "M 1 1 L 2 2".parse().unwrap();
    assert!(path
        .transform(&affine(f64::INFINITY, 0.0, 0.0, 1.0, 0.0, 0.0))
        .is_err());
}
