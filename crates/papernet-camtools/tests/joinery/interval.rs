use papernet_camtools::{subtract_range_set, Interval, IntervalSet};
use proptest::prelude::*;

/// Strictly increasing points paired up into a valid set.
fn interval_set() -> impl Strategy<Value = IntervalSet> {
    prop::collection::vec(0.0f64..1.0, 0..16).prop_map(|mut points| {
        points.sort_by(f64::total_cmp);
        points.dedup();
        let intervals: Vec<Interval> = points
            .chunks_exact(2)
            .map(|pair| [pair[0], pair[1]])
            .collect();
        IntervalSet::new(intervals).unwrap()
    })
}

#[test]
fn test_punch_out_middle() {
    let result = subtract_range_set(vec![[0.0, 1.0]], vec![[0.2, 0.4]]).unwrap();
    assert_eq!(result, vec![[0.0, 0.2], [0.4, 1.0]]);
}

#[test]
fn test_touching_input_is_rejected() {
    let err = subtract_range_set(vec![[0.0, 0.5], [0.5, 1.0]], vec![]).unwrap_err();
    assert!(err.to_string().contains("entry 1"));
    assert!(subtract_range_set(vec![[0.0, 1.0]], vec![[0.6, 0.3]]).is_err());
}

#[test]
fn test_remove_spanning_several_intervals() {
    let base = IntervalSet::new(vec![[0.0, 0.1], [0.2, 0.3], [0.4, 0.5], [0.6, 0.7]]).unwrap();
    let remove = IntervalSet::new(vec![[0.05, 0.45]]).unwrap();
    assert_eq!(
        base.subtract(&remove).as_slice(),
        &[[0.0, 0.05], [0.45, 0.5], [0.6, 0.7]]
    );
}

proptest! {
    #[test]
    fn prop_subtract_is_closed(a in interval_set(), b in interval_set()) {
        let result = a.subtract(&b);
        prop_assert!(IntervalSet::new(result.as_slice().to_vec()).is_ok());
        for &[s, e] in &result {
            for &[bs, be] in &b {
                prop_assert!(!(s < be && bs < e), "[{s}, {e}) overlaps [{bs}, {be})");
            }
        }
    }

    #[test]
    fn prop_subtract_membership(a in interval_set(), b in interval_set(), x in 0.0f64..1.0) {
        let result = a.subtract(&b);
        prop_assert_eq!(result.contains(x), a.contains(x) && !b.contains(x));
    }
}
