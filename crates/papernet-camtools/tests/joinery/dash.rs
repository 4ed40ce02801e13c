use papernet_camtools::{dash_path, dash_ratios, DashPatternCatalog, DashSpec};
use papernet_core::Point;
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

#[test]
fn test_three_full_tiles() {
    let spec = DashSpec::new(vec![2.0, 1.0], 3.0, 0.0).unwrap();
    let ratios = dash_ratios(pt(0.0, 0.0), pt(9.0, 0.0), &spec).unwrap();
    assert_eq!(ratios.len(), 3);
    for &[s, e] in &ratios {
        assert!((e - s - 2.0 / 3.0 * (3.0 / 9.0)).abs() < 1e-12);
    }
    // centred: equal clearance at both ends
    let first = ratios.as_slice()[0][0];
    let last = ratios.as_slice()[2][1];
    assert!((first - (1.0 - last)).abs() < 1e-12);
}

#[test]
fn test_dash_path_follows_segment() {
    let spec = DashSpec::new(vec![2.0, 1.0], 3.0, 0.0).unwrap();
    let path = dash_path(pt(0.0, 0.0), pt(0.0, 9.0), &spec).unwrap();
    assert_eq!(path.subpaths().len(), 3);
    let first = &path.subpaths()[0];
    assert!(first.start_point().unwrap().approx_eq(&pt(0.0, 0.5), 1e-9));
    assert!(first.current_point().unwrap().approx_eq(&pt(0.0, 2.5), 1e-9));
}

#[test]
fn test_catalog_is_passed_by_reference() {
    let catalog = DashPatternCatalog::builtin().with_pattern("long", vec![8.0, 2.0]).unwrap();
    let spec = catalog.spec("long", 10.0, 0.0).unwrap();
    assert_eq!(spec.pattern, vec![8.0, 2.0]);
    assert!(catalog.spec("missing", 10.0, 0.0).is_err());
}

proptest! {
    #[test]
    fn prop_strokes_stay_inside_segment(
        pattern in prop::collection::vec(0.1f64..5.0, 1..6),
        tile in 0.5f64..20.0,
        length in 1.0f64..200.0,
        offset in 0.0f64..1.0,
    ) {
        let spec = DashSpec::new(pattern, tile, offset).unwrap();
        let ratios = dash_ratios(pt(0.0, 0.0), pt(length, 0.0), &spec).unwrap();
        for &[s, e] in &ratios {
            prop_assert!(s >= -1e-9 && e <= 1.0 + 1e-9);
            prop_assert!(s < e);
        }
        for pair in ratios.as_slice().windows(2) {
            prop_assert!(pair[0][1] < pair[1][0]);
        }
    }
}
