//! Net job configuration
//!
//! A [`NetJob`] mirrors the generator parameter records, but keeps angles in
//! degrees and lets dash patterns be picked from the catalogue by name.
//! [`NetJob::to_net_spec`] resolves it into the radian-based
//! [`NetSpec`] the generators consume.

use std::path::Path;

use papernet_camtools::{
    is_stroke_colour, AscendantEdgeTabsSpec, BaseEdgeTabsSpec, BendGuideValley,
    DashPatternCatalog, DashSpec, FaceGeometry, NetSpec, SvgStyle,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SettingsError};

/// Dash pattern given by catalogue name or spelled out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashSelector {
    Named {
        name: String,
        tile_length: f64,
        #[serde(default)]
        offset_ratio: f64,
    },
    Pattern {
        pattern: Vec<f64>,
        tile_length: f64,
        #[serde(default)]
        offset_ratio: f64,
    },
}

impl DashSelector {
    pub fn named(name: impl Into<String>, tile_length: f64) -> Self {
        DashSelector::Named {
            name: name.into(),
            tile_length,
            offset_ratio: 0.0,
        }
    }

    /// Look the pattern up in `catalog` if needed and validate it.
    pub fn resolve(&self, catalog: &DashPatternCatalog) -> Result<DashSpec> {
        match self {
            DashSelector::Named {
                name,
                tile_length,
                offset_ratio,
            } => {
                if catalog.get(name).is_none() {
                    return Err(SettingsError::UnknownDashPattern(name.clone()));
                }
                Ok(catalog.spec(name, *tile_length, *offset_ratio)?)
            }
            DashSelector::Pattern {
                pattern,
                tile_length,
                offset_ratio,
            } => Ok(DashSpec::new(pattern.clone(), *tile_length, *offset_ratio)?),
        }
    }
}

fn resolve_dash(
    selector: &Option<DashSelector>,
    catalog: &DashPatternCatalog,
) -> Result<Option<DashSpec>> {
    selector.as_ref().map(|s| s.resolve(catalog)).transpose()
}

/// Ascendant-edge tab parameters with angles in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscendantTabSettings {
    pub tabs_count: usize,
    pub tab_depth_to_traversal_length: f64,
    pub midpoint_depth_to_tab_depth: f64,
    pub tab_start_gap_to_tab_depth: f64,
    pub tab_widening_angle_deg: f64,
    pub tab_rounding_distance_ratio: f64,
    pub female_depth_to_tab_depth: f64,
    pub female_taper_angle_deg: f64,
    pub score_dash: Option<DashSelector>,
}

impl Default for AscendantTabSettings {
    fn default() -> Self {
        let spec = AscendantEdgeTabsSpec::default();
        Self {
            tabs_count: spec.tabs_count,
            tab_depth_to_traversal_length: spec.tab_depth_to_traversal_length,
            midpoint_depth_to_tab_depth: spec.midpoint_depth_to_tab_depth,
            tab_start_gap_to_tab_depth: spec.tab_start_gap_to_tab_depth,
            tab_widening_angle_deg: spec.tab_widening_angle.to_degrees(),
            tab_rounding_distance_ratio: spec.tab_rounding_distance_ratio,
            female_depth_to_tab_depth: spec.female_depth_to_tab_depth,
            female_taper_angle_deg: spec.female_taper_angle.to_degrees(),
            score_dash: None,
        }
    }
}

impl AscendantTabSettings {
    pub fn to_spec(&self, catalog: &DashPatternCatalog) -> Result<AscendantEdgeTabsSpec> {
        Ok(AscendantEdgeTabsSpec {
            tabs_count: self.tabs_count,
            tab_depth_to_traversal_length: self.tab_depth_to_traversal_length,
            midpoint_depth_to_tab_depth: self.midpoint_depth_to_tab_depth,
            tab_start_gap_to_tab_depth: self.tab_start_gap_to_tab_depth,
            tab_widening_angle: self.tab_widening_angle_deg.to_radians(),
            tab_rounding_distance_ratio: self.tab_rounding_distance_ratio,
            female_depth_to_tab_depth: self.female_depth_to_tab_depth,
            female_taper_angle: self.female_taper_angle_deg.to_radians(),
            score_dash: resolve_dash(&self.score_dash, catalog)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendGuideValleySettings {
    pub depth_ratio: f64,
    pub theta_deg: f64,
}

/// Base-edge tab parameters with angles in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseTabSettings {
    pub handle_angle_deg: f64,
    pub hole_depth_to_tab_depth: f64,
    pub hole_width_ratio: f64,
    pub hole_taper_deg: f64,
    pub fin_width_to_hole_width: f64,
    pub fin_depth_to_tab_depth: f64,
    pub fin_flare_angle_deg: f64,
    pub rounding_distance_ratio: f64,
    pub midline_score: bool,
    pub bend_guide_valley: Option<BendGuideValleySettings>,
    pub score_dash: Option<DashSelector>,
}

impl Default for BaseTabSettings {
    fn default() -> Self {
        let spec = BaseEdgeTabsSpec::default();
        Self {
            handle_angle_deg: spec.handle_angle.to_degrees(),
            hole_depth_to_tab_depth: spec.hole_depth_to_tab_depth,
            hole_width_ratio: spec.hole_width_ratio,
            hole_taper_deg: spec.hole_taper.to_degrees(),
            fin_width_to_hole_width: spec.fin_width_to_hole_width,
            fin_depth_to_tab_depth: spec.fin_depth_to_tab_depth,
            fin_flare_angle_deg: spec.fin_flare_angle.to_degrees(),
            rounding_distance_ratio: spec.rounding_distance_ratio,
            midline_score: spec.midline_score,
            bend_guide_valley: None,
            score_dash: None,
        }
    }
}

impl BaseTabSettings {
    pub fn to_spec(&self, catalog: &DashPatternCatalog) -> Result<BaseEdgeTabsSpec> {
        Ok(BaseEdgeTabsSpec {
            handle_angle: self.handle_angle_deg.to_radians(),
            hole_depth_to_tab_depth: self.hole_depth_to_tab_depth,
            hole_width_ratio: self.hole_width_ratio,
            hole_taper: self.hole_taper_deg.to_radians(),
            fin_width_to_hole_width: self.fin_width_to_hole_width,
            fin_depth_to_tab_depth: self.fin_depth_to_tab_depth,
            fin_flare_angle: self.fin_flare_angle_deg.to_radians(),
            rounding_distance_ratio: self.rounding_distance_ratio,
            bend_guide_valley: self.bend_guide_valley.map(|v| BendGuideValley {
                depth_ratio: v.depth_ratio,
                theta: v.theta_deg.to_radians(),
            }),
            midline_score: self.midline_score,
            score_dash: resolve_dash(&self.score_dash, catalog)?,
        })
    }
}

/// One dieline job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetJob {
    /// Physical length of one unit of the face edge ratios, in millimetres
    pub scale: f64,
    pub base_tab_depth_to_base_length: f64,
    pub face: FaceGeometry,
    pub ascendant: AscendantTabSettings,
    pub base: BaseTabSettings,
    /// Dash for the folds between neighbouring faces
    pub interface_dash: Option<DashSelector>,
    pub svg: SvgStyle,
}

impl Default for NetJob {
    fn default() -> Self {
        let spec = NetSpec::default();
        Self {
            scale: spec.scale,
            base_tab_depth_to_base_length: spec.base_tab_depth_to_base_length,
            face: spec.face,
            ascendant: AscendantTabSettings::default(),
            base: BaseTabSettings::default(),
            interface_dash: Some(DashSelector::named("dash", 6.0)),
            svg: SvgStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl NetJob {
    /// Load a job from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let job: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        info!(path = %path.display(), "net job loaded");
        Ok(job)
    }

    /// Validate and write the job, choosing the format by extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        info!(path = %path.display(), "net job saved");
        Ok(())
    }

    /// Check every parameter against the generators' domains.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SettingsError::invalid_setting(
                "scale",
                format!("must be positive, got {}", self.scale),
            ));
        }
        if !(self.svg.stroke_width.is_finite() && self.svg.stroke_width > 0.0) {
            return Err(SettingsError::invalid_setting(
                "svg.stroke_width",
                format!("must be positive, got {}", self.svg.stroke_width),
            ));
        }
        if !(self.svg.margin.is_finite() && self.svg.margin >= 0.0) {
            return Err(SettingsError::invalid_setting(
                "svg.margin",
                format!("must be non-negative, got {}", self.svg.margin),
            ));
        }
        for (key, colour) in [
            ("svg.cut_stroke", &self.svg.cut_stroke),
            ("svg.score_stroke", &self.svg.score_stroke),
        ] {
            if !is_stroke_colour(colour) {
                return Err(SettingsError::invalid_setting(
                    key,
                    format!("'{colour}' is not a #rgb, #rrggbb or named colour"),
                ));
            }
        }

        let spec = self.to_net_spec(&DashPatternCatalog::builtin())?;
        spec.face.validate()?;
        spec.ascendant.validate().map_err(papernet_core::Error::from)?;
        spec.base.validate().map_err(papernet_core::Error::from)?;
        Ok(())
    }

    /// Resolve into generator parameters, looking dash names up in `catalog`.
    pub fn to_net_spec(&self, catalog: &DashPatternCatalog) -> Result<NetSpec> {
        Ok(NetSpec {
            face: self.face.clone(),
            scale: self.scale,
            ascendant: self.ascendant.to_spec(catalog)?,
            base: self.base.to_spec(catalog)?,
            base_tab_depth_to_base_length: self.base_tab_depth_to_base_length,
            interface_dash: resolve_dash(&self.interface_dash, catalog)?,
        })
    }
}
