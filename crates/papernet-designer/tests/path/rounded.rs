use papernet_core::Point;
use papernet_designer::{rounded_corner_path, Corner, PathCommand};
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

fn coord() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

proptest! {
    #[test]
    fn prop_fillet_stays_within_half_segments(
        a in (coord(), coord()),
        v in (coord(), coord()),
        b in (coord(), coord()),
        distance in 0.0f64..200.0,
    ) {
        let (a, v, b) = (pt(a.0, a.1), pt(v.0, v.1), pt(b.0, b.1));
        prop_assume!(a.distance_to(&v) > 1e-3 && b.distance_to(&v) > 1e-3);

        let corners = [Corner::Sharp(a), Corner::Rounded(v), Corner::Sharp(b)];
        let path = rounded_corner_path(&corners, distance, false).unwrap();
        let commands = path.commands();

        if let [
            PathCommand::Move { .. },
            PathCommand::Line { to: entry },
            PathCommand::CubicBezier { ctrl1, ctrl2, to: exit },
            PathCommand::Line { .. },
        ] = commands
        {
            let eps = 1e-9;
            prop_assert!(entry.distance_to(&v) <= a.distance_to(&v) / 2.0 + eps);
            prop_assert!(exit.distance_to(&v) <= b.distance_to(&v) / 2.0 + eps);
            prop_assert!(entry.distance_to(&v) <= distance + eps);
            prop_assert!(ctrl1.distance_to(&v) <= entry.distance_to(&v) + eps);
            prop_assert!(ctrl2.distance_to(&v) <= exit.distance_to(&v) + eps);
        } else {
            prop_assert!(distance == 0.0, "unexpected shape {}", path);
        }
    }

    #[test]
    fn prop_closed_polygon_rounds_every_corner(
        points in prop::collection::vec((coord(), coord()), 3..10),
        distance in 0.01f64..50.0,
    ) {
        let points: Vec<Point> = points.into_iter().map(|(x, y)| pt(x, y)).collect();
        let n = points.len();
        prop_assume!((0..n).all(|i| points[i].distance_to(&points[(i + 1) % n]) > 1e-3));

        let corners: Vec<Corner> = points.iter().copied().map(Corner::Rounded).collect();
        let path = rounded_corner_path(&corners, distance, true).unwrap();
        let cubics = path
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicBezier { .. }))
            .count();
        prop_assert_eq!(cubics, n);
        prop_assert_eq!(path.commands().last(), Some(&PathCommand::Close));
    }
}

#[test]
fn test_sharp_corners_are_plain_polyline() {
    let corners = [
        Corner::Sharp(pt(0.0, 0.0)),
        Corner::Sharp(pt(4.0, 0.0)),
        Corner::Sharp(pt(4.0, 3.0)),
    ];
    let path = rounded_corner_path(&corners, 10.0, true).unwrap();
    assert_eq!(path.to_wire_format(), "M 0 0 L 4 0 L 4 3 Z");
}

#[test]
fn test_rounded_triangle_has_one_cubic_per_corner() {
    let corners = [
        Corner::Rounded(pt(0.0, 0.0)),
        Corner::Rounded(pt(10.0, 0.0)),
        Corner::Rounded(pt(5.0, 8.0)),
    ];
    let path = rounded_corner_path(&corners, 1.0, true).unwrap();
    let cubics = path
        .iter()
        .filter(|c| matches!(c, PathCommand::CubicBezier { .. }))
        .count();
    assert_eq!(cubics, 3);
    assert_eq!(path.subpaths().len(), 1);
}
