//! Pyramid net assembly
//!
//! Lays the triangular faces of a pyramid side by side around a shared apex
//! and joins the tab generators into one dieline: the free edges carry the
//! ascendant tabs, every base edge carries a hole handle or a fin.

use std::f64::consts::TAU;

use papernet_core::{triangle_apex_angle, GeometryError, Point, Result};
use papernet_designer::PathData;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dash::{ratio_path, DashSpec};
use crate::tabs::{
    ascendant_edge_tabs, base_edge_tabs, check_positive, score_coverage, AscendantEdgeTabsSpec,
    BaseEdgeTabsSpec,
};

/// Shape of one pyramid face, as read from a polyhedron catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    /// Relative lengths of the base, left and right edges
    pub edge_ratios: [f64; 3],
    pub face_count: usize,
}

impl FaceGeometry {
    pub fn new(edge_ratios: [f64; 3], face_count: usize) -> Self {
        Self {
            edge_ratios,
            face_count,
        }
    }

    /// Regular square pyramid with equilateral side faces.
    pub fn square_pyramid() -> Self {
        Self::new([1.0, 1.0, 1.0], 4)
    }

    pub fn is_isosceles(&self) -> bool {
        (self.edge_ratios[1] - self.edge_ratios[2]).abs() < 1e-12
    }

    /// Angle every face subtends at the apex.
    pub fn apex_angle(&self) -> Result<f64> {
        let [base, left, right] = self.edge_ratios;
        Ok(triangle_apex_angle(base, left, right)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.face_count < 3 {
            return Err(GeometryError::invalid_parameter(
                "face_count",
                format!("a pyramid needs at least 3 faces, got {}", self.face_count),
            )
            .into());
        }
        if self.face_count % 2 == 1 && !self.is_isosceles() {
            return Err(GeometryError::infeasible(
                "an odd number of faces cannot close with unequal left and right edges",
            )
            .into());
        }
        let total = self.apex_angle()? * self.face_count as f64;
        if total > TAU {
            return Err(GeometryError::infeasible(format!(
                "faces span {:.2}° around the apex, more than a full turn",
                total.to_degrees()
            ))
            .into());
        }
        Ok(())
    }
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self::square_pyramid()
    }
}

/// Everything needed to lay out one pyramid net
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetSpec {
    pub face: FaceGeometry,
    /// Physical length of one unit of `edge_ratios`
    pub scale: f64,
    pub ascendant: AscendantEdgeTabsSpec,
    pub base: BaseEdgeTabsSpec,
    pub base_tab_depth_to_base_length: f64,
    /// Dash for the folds between neighbouring faces; solid when absent
    pub interface_dash: Option<DashSpec>,
}

impl Default for NetSpec {
    fn default() -> Self {
        Self {
            face: FaceGeometry::default(),
            scale: 100.0,
            ascendant: AscendantEdgeTabsSpec::default(),
            base: BaseEdgeTabsSpec::default(),
            base_tab_depth_to_base_length: 0.15,
            interface_dash: None,
        }
    }
}

/// Cut and score paths of a complete net
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dieline {
    pub cut: PathData,
    pub score: PathData,
}

/// Outer vertices of the faces, counter-clockwise around the apex at the origin.
///
/// Faces alternate between `(left, right)` and `(right, left)` so that each
/// shared edge has the same length on both sides.
fn rim_points(face: &FaceGeometry, scale: f64) -> Result<Vec<Point>> {
    let [_, left, right] = face.edge_ratios;
    let apex_angle = face.apex_angle()?;
    (0..=face.face_count)
        .map(|k| -> Result<Point> {
            let ratio = if k % 2 == 0 { left } else { right };
            Ok(Point::from_polar(k as f64 * apex_angle, ratio * scale)?)
        })
        .collect()
}

/// Build the dieline of the pyramid described by `spec`.
pub fn pyramid_net(spec: &NetSpec) -> Result<Dieline> {
    spec.face.validate()?;
    check_positive("scale", spec.scale)?;
    check_positive(
        "base_tab_depth_to_base_length",
        spec.base_tab_depth_to_base_length,
    )?;
    if let Some(dash) = &spec.interface_dash {
        dash.validate()?;
    }

    let apex = Point::ORIGIN;
    let rim = rim_points(&spec.face, spec.scale)?;
    let faces = spec.face.face_count;
    let base_tab_depth =
        spec.face.edge_ratios[0] * spec.scale * spec.base_tab_depth_to_base_length;

    let mut cut = PathData::new();
    let mut holes = PathData::new();
    let mut score = PathData::new();

    let first = ascendant_edge_tabs(apex, rim[0], &spec.ascendant)?;
    cut.concat(&first.male.cut);
    score.concat(&first.male.score);

    for (k, edge) in rim.windows(2).enumerate() {
        let tabs = base_edge_tabs(edge[0], edge[1], base_tab_depth, &spec.base)?;
        if k % 2 == 0 {
            let mut pieces = tabs.hole.cut.subpaths().into_iter();
            if let Some(handle) = pieces.next() {
                cut.fuse(&handle)?;
            }
            for hole in pieces {
                holes.concat(&hole);
            }
            score.concat(&tabs.hole.score);
        } else {
            cut.fuse(&tabs.fin.cut)?;
            score.concat(&tabs.fin.score);
        }
        debug!(face = k, hole = k % 2 == 0, "base edge placed");
    }

    let last = ascendant_edge_tabs(rim[faces], apex, &spec.ascendant)?;
    cut.fuse(&last.female.cut)?;
    cut.close()?;
    score.concat(&last.female.score);

    for &corner in &rim[1..faces] {
        let coverage = score_coverage(apex, corner, spec.interface_dash.as_ref())?;
        score.concat(&ratio_path(apex, corner, &coverage)?);
    }

    cut.concat(&holes);
    info!(
        faces,
        cut_commands = cut.len(),
        score_commands = score.len(),
        "pyramid net assembled"
    );
    Ok(Dieline { cut, score })
}
