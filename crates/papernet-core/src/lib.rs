//! # papernet Core
//!
//! Core types and constructions shared by the papernet dieline engine.
//! Provides the canonical point type, the hinged-plot algebra used to derive
//! tab profiles from existing edges, and the error taxonomy every other crate
//! reports through.

pub mod error;
pub mod geometry;
pub mod point;

pub use error::{Error, GeometryError, IntervalError, PathError, Result};
pub use geometry::{
    hinged_plot, hinged_plot_by_projection_distance, hinged_plot_lerp, line_lerp,
    line_line_intersection, parallel_line_points_at_distance, symmetric_hinge_plot,
    symmetric_hinge_plot_by_projection_distance, triangle_apex_angle,
};
pub use point::{Point, EPSILON};
