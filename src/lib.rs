//! # papernet
//!
//! Dieline generator for paper polyhedra: flat faces joined by interlocking
//! fold-and-lock tabs, with dashed score lines for folding.
//!
//! ## Architecture
//!
//! papernet is organized as a workspace with multiple crates:
//!
//! 1. **papernet-core** - Points, hinged-plot constructions, error types
//! 2. **papernet-designer** - Path command model, wire format, rounded corners
//! 3. **papernet-camtools** - Intervals, dashes, tab joinery, nets, SVG output
//! 4. **papernet-settings** - Net job files in TOML or JSON
//! 5. **papernet** - Main binary that integrates all crates

use papernet_camtools::{pyramid_net, render_svg, DashPatternCatalog};

pub use papernet_core::{Error, GeometryError, IntervalError, PathError, Point, Result};
pub use papernet_designer::{PathCommand, PathData};

pub use papernet_camtools::{
    ascendant_edge_tabs, base_edge_tabs, dash_path, dash_ratios, AscendantEdgeTabs,
    AscendantEdgeTabsSpec, BaseEdgeTabs, BaseEdgeTabsSpec, BendGuideValley, CutScore, DashSpec,
    Dieline, FaceGeometry, IntervalSet, NetSpec, SvgStyle,
};

pub use papernet_settings::{DashSelector, NetJob, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// What the generated dieline is written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document
    Svg,
    /// Cut and score wire strings, one per line
    Paths,
}

/// Generate the dieline for `job` and render it in `format`.
pub fn render_job(job: &NetJob, format: OutputFormat) -> anyhow::Result<String> {
    job.validate()?;
    let spec = job.to_net_spec(&DashPatternCatalog::builtin())?;
    let dieline = pyramid_net(&spec)?;
    let text = match format {
        OutputFormat::Svg => render_svg(&dieline, &job.svg)?,
        OutputFormat::Paths => format!("cut: {}\nscore: {}\n", dieline.cut, dieline.score),
    };
    Ok(text)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr with pretty formatting
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the generated document
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_job_renders_svg() {
        let svg = render_job(&NetJob::default(), OutputFormat::Svg).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("stroke:#ff0000"));
        assert!(svg.contains("stroke:#0000ff"));
    }

    #[test]
    fn test_paths_output_parses_back() {
        let text = render_job(&NetJob::default(), OutputFormat::Paths).unwrap();
        let mut lines = text.lines();
        let cut = lines.next().unwrap().strip_prefix("cut: ").unwrap();
        let parsed: PathData = cut.parse().unwrap();
        assert_eq!(parsed.to_wire_format(), cut);
        assert!(lines.next().unwrap().starts_with("score: M "));
    }

    #[test]
    fn test_invalid_job_is_reported() {
        let mut job = NetJob::default();
        job.ascendant.tabs_count = 0;
        let err = render_job(&job, OutputFormat::Paths).unwrap_err();
        assert!(err.downcast_ref::<SettingsError>().is_some());
    }
    #[test]
    fn test_saved_job_renders_the_same() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hexagon.toml");

        let mut job = NetJob::default();
        job.face = FaceGeometry::new([0.8, 1.0, 1.0], 6);
        job.interface_dash = Some(DashSelector::named("dot-dash", 8.0));
        job.save(&path).unwrap();

        let loaded = NetJob::load(&path).unwrap();
        assert_eq!(
            render_job(&loaded, OutputFormat::Paths).unwrap(),
            render_job(&job, OutputFormat::Paths).unwrap()
        );
    }

    #[test]
    fn test_svg_written_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("net.svg");
        let svg = render_job(&NetJob::default(), OutputFormat::Svg).unwrap();
        std::fs::write(&out, &svg).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_unknown_dash_name_fails() {
        let mut job = NetJob::default();
        job.interface_dash = Some(DashSelector::named("wavy", 8.0));
        let err = render_job(&job, OutputFormat::Svg).unwrap_err();
        assert!(err.to_string().contains("wavy"));
    }
}
