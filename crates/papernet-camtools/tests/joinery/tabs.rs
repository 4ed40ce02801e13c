use papernet_camtools::{
    ascendant_edge_tabs, base_edge_tabs, AscendantEdgeTabsSpec, BaseEdgeTabsSpec, DashSpec,
};
use papernet_core::Point;
use papernet_designer::{PathCommand, PathData};
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

/// Ratio of each subpath's start and end along the x axis from 0 to `length`.
fn x_spans(path: &PathData, length: f64) -> Vec<(f64, f64)> {
    path.subpaths()
        .iter()
        .map(|sub| {
            let a = sub.start_point().unwrap().x() / length;
            let b = sub.current_point().unwrap().x() / length;
            (a.min(b), a.max(b))
        })
        .collect()
}

#[test]
fn test_zero_tabs_fail_with_geometry_error() {
    let spec = AscendantEdgeTabsSpec {
        tabs_count: 0,
        ..AscendantEdgeTabsSpec::default()
    };
    let err = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap_err();
    assert!(err.is_geometry_error());
}

#[test]
fn test_gaps_leaving_no_room_fail() {
    let spec = AscendantEdgeTabsSpec {
        tab_start_gap_to_tab_depth: 10.0,
        ..AscendantEdgeTabsSpec::default()
    };
    let err = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap_err();
    assert!(err.is_geometry_error());
}

#[test]
fn test_solid_scores_complement_each_other() {
    let tabs =
        ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &AscendantEdgeTabsSpec::default())
            .unwrap();
    // three tabs leave four stretches of fold on the male side
    assert_eq!(tabs.male.score.subpaths().len(), 4);
    assert_eq!(tabs.female.score.subpaths().len(), 3);
    assert_eq!(tabs.male.cut.subpaths().len(), 1);
    assert_eq!(tabs.female.cut.subpaths().len(), 1);
}

#[test]
fn test_dashed_male_score_avoids_tabs() {
    let spec = AscendantEdgeTabsSpec {
        score_dash: Some(DashSpec::new(vec![2.0, 1.0], 3.0, 0.25).unwrap()),
        ..AscendantEdgeTabsSpec::default()
    };
    let tabs = ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &spec).unwrap();
    let spans = x_spans(&tabs.male.score, 100.0);
    assert!(spans.len() > 4);
    for (s, e) in spans {
        for &[ts, te] in &tabs.tabs {
            assert!(!(s < te - 1e-9 && ts < e - 1e-9), "score ({s}, {e}) enters tab");
        }
    }
}

#[test]
fn test_base_tabs_on_slanted_edge_stay_outside() {
    let start = pt(10.0, 10.0);
    let end = pt(60.0, 40.0);
    let tabs = base_edge_tabs(start, end, 8.0, &BaseEdgeTabsSpec::default()).unwrap();
    let edge = end - start;
    for path in [&tabs.hole.cut, &tabs.fin.cut] {
        for p in path.iter().filter_map(PathCommand::to) {
            assert!(edge.cross(&(p - start)) <= 1e-9, "{p:?} is inside the face");
        }
    }
}

#[test]
fn test_base_tabs_reject_wide_fin() {
    let spec = BaseEdgeTabsSpec {
        fin_width_to_hole_width: 1.0,
        ..BaseEdgeTabsSpec::default()
    };
    let err = base_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), 15.0, &spec).unwrap_err();
    assert!(err.is_geometry_error());
}

proptest! {
    #[test]
    fn prop_any_rounding_ratio_is_clamped(ratio in 0.0f64..5.0) {
        let ascendant = AscendantEdgeTabsSpec {
            tab_rounding_distance_ratio: ratio,
            ..AscendantEdgeTabsSpec::default()
        };
        prop_assert!(ascendant_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), &ascendant).is_ok());

        let base = BaseEdgeTabsSpec {
            rounding_distance_ratio: ratio,
            ..BaseEdgeTabsSpec::default()
        };
        prop_assert!(base_edge_tabs(pt(0.0, 0.0), pt(100.0, 0.0), 15.0, &base).is_ok());
    }
}
