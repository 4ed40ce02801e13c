//! Interval (range-set) algebra
//!
//! Coverage along a segment is expressed as ratios in `[0, 1]`. An
//! [`IntervalSet`] holds ascending, disjoint, non-touching half-open
//! `[start, end)` ranges; tab footprints are punched out of dash coverage
//! with [`IntervalSet::subtract`].

use papernet_core::IntervalError;
use serde::{Deserialize, Serialize};

pub type Interval = [f64; 2];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Validate `intervals` as an interval set.
    pub fn new(intervals: Vec<Interval>) -> Result<Self, IntervalError> {
        for (index, &[start, end]) in intervals.iter().enumerate() {
            if !start.is_finite() || !end.is_finite() {
                return Err(IntervalError::invalid(index, "endpoints must be finite"));
            }
            if start >= end {
                return Err(IntervalError::invalid(
                    index,
                    format!("start {start} is not below end {end}"),
                ));
            }
            if index > 0 && intervals[index - 1][1] >= start {
                return Err(IntervalError::invalid(
                    index,
                    "intervals must be ascending and must not overlap or touch",
                ));
            }
        }
        Ok(Self { intervals })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The whole segment, `[[0, 1]]`.
    pub fn unit() -> Self {
        Self {
            intervals: vec![[0.0, 1.0]],
        }
    }

    /// Normalise arbitrary ranges: sort, merge overlapping or touching
    /// ranges and drop empty ones.
    pub fn from_unsorted(mut ranges: Vec<Interval>) -> Result<Self, IntervalError> {
        if let Some(index) = ranges
            .iter()
            .position(|r| !r[0].is_finite() || !r[1].is_finite())
        {
            return Err(IntervalError::invalid(index, "endpoints must be finite"));
        }
        ranges.retain(|r| r[0] < r[1]);
        ranges.sort_by(|a, b| a[0].total_cmp(&b[0]));

        let mut merged: Vec<Interval> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range[0] <= last[1] => last[1] = last[1].max(range[1]),
                _ => merged.push(range),
            }
        }
        Ok(Self { intervals: merged })
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn total_length(&self) -> f64 {
        self.intervals.iter().map(|[s, e]| e - s).sum()
    }

    /// Whether `x` lies inside one of the half-open intervals.
    pub fn contains(&self, x: f64) -> bool {
        let i = self.intervals.partition_point(|r| r[1] <= x);
        self.intervals.get(i).is_some_and(|r| r[0] <= x)
    }

    /// Every value mapped through `f`, which must be strictly increasing.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Result<Self, IntervalError> {
        Self::new(self.intervals.iter().map(|[s, e]| [f(*s), f(*e)]).collect())
    }

    /// `self` with every portion covered by `remove` deleted.
    ///
    /// Endpoints are flattened into one ascending list; binary search gives
    /// the insertion index of each removed endpoint, where an even index lies
    /// in a gap and an odd index inside an interval. Odd endpoints become new
    /// interval ends, and everything between them is dropped.
    pub fn subtract(&self, remove: &IntervalSet) -> IntervalSet {
        let mut flat: Vec<f64> = self.intervals.iter().flatten().copied().collect();

        for &[r0, r1] in &remove.intervals {
            let i0 = flat.partition_point(|&x| x < r0);
            let i1 = flat.partition_point(|&x| x <= r1);
            if i0 == flat.len() || i1 == 0 {
                continue;
            }

            let mut next = Vec::with_capacity(flat.len() + 2);
            next.extend_from_slice(&flat[..i0]);
            if i0 % 2 == 1 {
                next.push(r0);
            }
            if i1 % 2 == 1 {
                next.push(r1);
            }
            next.extend_from_slice(&flat[i1..]);
            flat = next;
        }

        let intervals = flat
            .chunks_exact(2)
            .map(|pair| [pair[0], pair[1]])
            .filter(|[s, e]| s < e)
            .collect();
        IntervalSet { intervals }
    }
}

/// Subtract raw range lists, validating both.
pub fn subtract_range_set(
    base: Vec<Interval>,
    remove: Vec<Interval>,
) -> Result<Vec<Interval>, IntervalError> {
    let base = IntervalSet::new(base)?;
    let remove = IntervalSet::new(remove)?;
    Ok(base.subtract(&remove).into())
}

impl TryFrom<Vec<Interval>> for IntervalSet {
    type Error = IntervalError;

    fn try_from(intervals: Vec<Interval>) -> Result<Self, Self::Error> {
        IntervalSet::new(intervals)
    }
}

impl From<IntervalSet> for Vec<Interval> {
    fn from(set: IntervalSet) -> Self {
        set.intervals
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
