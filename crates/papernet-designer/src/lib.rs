//! # papernet Designer
//!
//! Vector path layer of the dieline engine. Every cut and score line the
//! generators emit is a [`PathData`]: an append-only sequence of absolute
//! drawing commands with a compact text wire format.
//!
//! ## Core Components
//!
//! - **Path model**: validated fluent builders, concatenation, slicing and
//!   fusing of sub-paths
//! - **Wire format**: canonical output, lenient SVG-style input
//! - **Transforms**: affine maps via `nalgebra`, with arc expansion
//! - **Rounded corners**: cubic fillets with clamped rounding distance
//! - **Rendering**: `lyon` conversion and flattened bounds
//!
//! ## Usage
//!
//! ```rust
//! use papernet_designer::{affine, PathData};
//!
//! let path: PathData = "M 0 0 L 10 0 L 10 10 Z".parse().unwrap();
//! let moved = path.transform(&affine(1.0, 0.0, 0.0, 1.0, 5.0, 0.0)).unwrap();
//! assert_eq!(moved.to_wire_format(), "M 5 0 L 15 0 L 15 10 Z");
//! ```

pub mod arc;
pub mod command;
pub mod path;
pub mod render;
pub mod rounded;
mod wire;

pub use arc::{arc_to_cubics, ArcApproximation, CubicSegment};
pub use command::{BezierFamily, PathCommand};
pub use path::{affine, PathData};
pub use render::Bounds;
pub use rounded::{clamped_rounding_distance, rounded_corner_path, Corner};
