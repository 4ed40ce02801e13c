//! Dash-pattern generator
//!
//! Score lines are drawn as dashes. A [`DashSpec`] describes one tile of
//! alternating stroke and gap lengths; the tile repeats along the segment and
//! the result is expressed as stroke ratios in `[0, 1]` so it can be combined
//! with tab footprints through the interval algebra.

use std::collections::BTreeMap;

use papernet_core::{GeometryError, Point, Result, EPSILON};
use papernet_designer::PathData;
use serde::{Deserialize, Serialize};

use crate::interval::{Interval, IntervalSet};

/// Upper bound on tiles laid along one segment
pub const MAX_DASH_TILES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashSpec {
    /// Alternating stroke/gap magnitudes, starting with a stroke
    pub pattern: Vec<f64>,
    /// Length of one repetition of the pattern along the segment
    pub tile_length: f64,
    /// Phase shift as a fraction of the segment, in `[0, 1)`
    #[serde(default)]
    pub offset_ratio: f64,
}

impl DashSpec {
    pub fn new(pattern: Vec<f64>, tile_length: f64, offset_ratio: f64) -> Result<Self> {
        let spec = Self {
            pattern,
            tile_length,
            offset_ratio,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> std::result::Result<(), GeometryError> {
        validate_pattern(&self.pattern)?;
        if !self.tile_length.is_finite() || self.tile_length <= 0.0 {
            return Err(GeometryError::invalid_parameter(
                "tile_length",
                format!("must be positive, got {}", self.tile_length),
            ));
        }
        if !(0.0..1.0).contains(&self.offset_ratio) {
            return Err(GeometryError::invalid_parameter(
                "offset_ratio",
                format!("must lie in [0, 1), got {}", self.offset_ratio),
            ));
        }
        Ok(())
    }

    /// The pattern with an odd length repeated once, so strokes and gaps alternate.
    pub fn normalized_pattern(&self) -> Vec<f64> {
        if self.pattern.len() % 2 == 1 {
            self.pattern.repeat(2)
        } else {
            self.pattern.clone()
        }
    }
}

fn validate_pattern(pattern: &[f64]) -> std::result::Result<(), GeometryError> {
    if pattern.is_empty() {
        return Err(GeometryError::invalid_parameter(
            "pattern",
            "dash pattern is empty",
        ));
    }
    if let Some(bad) = pattern.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(GeometryError::invalid_parameter(
            "pattern",
            format!("dash entries must be positive, got {bad}"),
        ));
    }
    Ok(())
}

/// Stroke intervals of one pattern repetition scaled to `[0, 1]`.
fn unit_strokes(pattern: &[f64]) -> Vec<Interval> {
    let total: f64 = pattern.iter().sum();
    let mut cursor = 0.0;
    let mut strokes = Vec::with_capacity(pattern.len() / 2);
    for (i, value) in pattern.iter().enumerate() {
        if i % 2 == 0 {
            strokes.push([cursor / total, (cursor + value) / total]);
        }
        cursor += value;
    }
    strokes
}

/// Stroke ratios along `start → end`.
///
/// Strokes that would straddle the far end after the phase shift are
/// discarded rather than split. The surviving strokes are then moved forward
/// by half the trailing gap, which keeps the phase shift visible.
pub fn dash_ratios(start: Point, end: Point, spec: &DashSpec) -> Result<IntervalSet> {
    spec.validate()?;
    let length = start.distance_to(&end);
    if length < EPSILON {
        return Err(GeometryError::DegenerateSegment.into());
    }

    let tiles = (length / spec.tile_length).ceil();
    if tiles > MAX_DASH_TILES as f64 {
        return Err(GeometryError::infeasible(format!(
            "dash tile {} is too short for a segment of length {length}",
            spec.tile_length
        ))
        .into());
    }
    let tile_ratio = spec.tile_length / length;
    let unit = unit_strokes(&spec.normalized_pattern());

    let mut strokes: Vec<Interval> = Vec::with_capacity(tiles as usize * unit.len());
    for tile in 0..tiles as usize {
        let origin = tile as f64 * tile_ratio;
        for &[s, e] in &unit {
            let stroke = [origin + s * tile_ratio, origin + e * tile_ratio];
            if stroke[0] >= 1.0 || stroke[1] > 1.0 + EPSILON {
                continue;
            }
            strokes.push([stroke[0], stroke[1].min(1.0)]);
        }
    }

    let offset = spec.offset_ratio;
    let shifted: Vec<Interval> = strokes
        .into_iter()
        .filter_map(|[s, e]| {
            let (s, e) = (s + offset, e + offset);
            if s >= 1.0 {
                Some([s - 1.0, e - 1.0])
            } else if e > 1.0 + EPSILON {
                None
            } else {
                Some([s, e.min(1.0)])
            }
        })
        .collect();

    let set = IntervalSet::from_unsorted(shifted)?;
    let last_end = match set.as_slice().last() {
        Some(last) => last[1],
        None => return Ok(set),
    };
    let shift = (1.0 - last_end) / 2.0;
    let centred = set.map(|x| x + shift)?;

    tracing::debug!(
        length,
        strokes = centred.len(),
        coverage = centred.total_length(),
        "dash ratios"
    );
    Ok(centred)
}

/// One `Move`/`Line` subpath per interval of `ratios` along `start → end`.
pub fn ratio_path(start: Point, end: Point, ratios: &IntervalSet) -> Result<PathData> {
    let mut path = PathData::new();
    for &[s, e] in ratios {
        path.move_to(start.lerp(&end, s)).line_to(start.lerp(&end, e))?;
    }
    Ok(path)
}

/// Dashed line along `start → end`.
pub fn dash_path(start: Point, end: Point, spec: &DashSpec) -> Result<PathData> {
    let ratios = dash_ratios(start, end, spec)?;
    ratio_path(start, end, &ratios)
}

/// Named dash patterns.
///
/// Built once and handed to whoever resolves pattern names; lookups never
/// mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPatternCatalog {
    patterns: BTreeMap<String, Vec<f64>>,
}

impl DashPatternCatalog {
    /// Catalog with no patterns.
    pub fn empty() -> Self {
        Self {
            patterns: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let patterns = [
            ("solid-ish", vec![12.0, 1.0]),
            ("dash", vec![2.0, 1.0]),
            ("dot-dash", vec![4.0, 1.0, 1.0, 1.0]),
            ("morse", vec![1.0, 1.0, 1.0, 1.0, 3.0, 1.0, 3.0, 1.0]),
        ];
        Self {
            patterns: patterns
                .into_iter()
                .map(|(name, pattern)| (name.to_string(), pattern))
                .collect(),
        }
    }

    /// Add or replace a pattern.
    pub fn with_pattern(
        mut self,
        name: impl Into<String>,
        pattern: Vec<f64>,
    ) -> std::result::Result<Self, GeometryError> {
        validate_pattern(&pattern)?;
        self.patterns.insert(name.into(), pattern);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.patterns.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve `name` into a full dash spec.
    pub fn spec(&self, name: &str, tile_length: f64, offset_ratio: f64) -> Result<DashSpec> {
        let pattern = self.get(name).ok_or_else(|| {
            GeometryError::invalid_parameter("pattern", format!("unknown dash pattern '{name}'"))
        })?;
        DashSpec::new(pattern.to_vec(), tile_length, offset_ratio)
    }
}

impl Default for DashPatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
