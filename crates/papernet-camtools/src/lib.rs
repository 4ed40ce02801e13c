//! # papernet CAM Tools
//!
//! Generators that turn edge endpoints and parameter records into cut and
//! score paths for paper polyhedra.
//!
//! ## Components
//!
//! - **Interval algebra**: sorted disjoint range sets over `[0, 1]`
//! - **Dash generator**: tiles relative dash patterns along a segment, with a
//!   catalogue of named patterns
//! - **Ascendant-edge tabs**: dovetail male tabs and tapered female flaps
//! - **Base-edge tabs**: handle with a locking hole, and the matching fin
//! - **Pyramid net**: faces laid around an apex with every joint tabbed
//! - **SVG output**: millimetre dieline documents

pub mod dash;
pub mod interval;
pub mod net;
pub mod svg;
pub mod tabs;

pub use dash::{dash_path, dash_ratios, ratio_path, DashPatternCatalog, DashSpec, MAX_DASH_TILES};
pub use interval::{subtract_range_set, Interval, IntervalSet};
pub use net::{pyramid_net, Dieline, FaceGeometry, NetSpec};
pub use svg::{is_stroke_colour, render_svg, SvgStyle};
pub use tabs::{
    ascendant_edge_tabs, base_edge_tabs, AscendantEdgeTabs, AscendantEdgeTabsSpec, BaseEdgeTabs,
    BaseEdgeTabsSpec, BendGuideValley, CutScore,
};
