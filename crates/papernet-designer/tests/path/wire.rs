use papernet_core::{PathError, Point};
use papernet_designer::{PathCommand, PathData};
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

#[derive(Debug, Clone)]
enum Step {
    Line(f64, f64),
    Cubic([f64; 6]),
    Quadratic([f64; 4]),
    Close,
}

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| Step::Line(x, y)),
        prop::array::uniform6(coord()).prop_map(Step::Cubic),
        prop::array::uniform4(coord()).prop_map(Step::Quadratic),
        Just(Step::Close),
    ]
}

fn build(start: (f64, f64), steps: &[Step]) -> PathData {
    let mut path = PathData::new();
    path.move_to(pt(start.0, start.1));
    for step in steps {
        if matches!(path.commands().last(), Some(PathCommand::Close)) {
            path.move_to(pt(start.1, start.0));
        }
        match step {
            Step::Line(x, y) => {
                path.line_to(pt(*x, *y)).unwrap();
            }
            Step::Cubic(c) => {
                path.cubic_bezier_to(pt(c[0], c[1]), pt(c[2], c[3]), pt(c[4], c[5]))
                    .unwrap();
            }
            Step::Quadratic(c) => {
                path.quadratic_bezier_to(pt(c[0], c[1]), pt(c[2], c[3])).unwrap();
            }
            Step::Close => {
                path.close().unwrap();
            }
        }
    }
    path
}

proptest! {
    #[test]
    fn prop_wire_format_round_trips(
        start in (coord(), coord()),
        steps in prop::collection::vec(step(), 0..24),
    ) {
        let path = build(start, &steps);
        let text = path.to_wire_format();
        let parsed = PathData::from_wire_format(&text).unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn prop_wire_format_has_no_exponents(
        start in (-1e-6f64..1e-6, 1e12f64..1e15),
    ) {
        let path = build(start, &[]);
        let text = path.to_wire_format();
        prop_assert!(!text.contains('e'), "{}", text);
    }
}

#[test]
fn test_smooth_commands_survive_round_trip() {
    let mut path = PathData::new();
    path.move_to(pt(0.0, 0.0))
        .quadratic_bezier_to(pt(1.0, 1.0), pt(2.0, 0.0))
        .unwrap()
        .smooth_quadratic_bezier_to(pt(4.0, 0.0))
        .unwrap()
        .elliptical_arc_to(3.0, 2.0, 15.0, true, false, pt(8.0, 1.0))
        .unwrap();
    let text = path.to_wire_format();
    assert_eq!(text, "M 0 0 Q 1 1 2 0 T 4 0 A 3 2 15 1 0 8 1");
    assert_eq!(text.parse::<PathData>().unwrap(), path);
}

#[test]
fn test_relative_input_normalises_to_absolute() {
    let path: PathData = "m 10,10 l 5-5 q 1 1 2 0 t 2 0 z".parse().unwrap();
    assert_eq!(path.to_wire_format(), "M 10 10 L 15 5 Q 16 6 17 5 T 19 5 Z");
}

#[test]
fn test_syntax_errors_carry_fragment() {
    match PathData::from_wire_format("M 0 0 L 1 1 L 2 ?") {
        Err(PathError::Syntax { fragment, .. }) => assert_eq!(fragment, "?"),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_builder_rejects_smooth_after_line() {
    let mut path = PathData::new();
    path.move_to(pt(0.0, 0.0)).line_to(pt(1.0, 0.0)).unwrap();
    let err = path.smooth_cubic_bezier_to(pt(2.0, 1.0), pt(3.0, 0.0)).unwrap_err();
    assert!(matches!(err, PathError::MalformedCommand { command: 'S', .. }));
    assert_eq!(path.len(), 2);
}
