//! Error handling for papernet
//!
//! Provides the error types shared by every layer of the dieline engine:
//! - Geometry errors (degenerate constructions, infeasible parameters)
//! - Path errors (wire-format syntax, command sequencing)
//! - Interval errors (range-set validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a construction cannot be carried out for the given inputs.
/// Generators never clamp their way around these; the caller is expected to
/// report the parameter combination as invalid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Two lines that were expected to cross are parallel or degenerate
    #[error("Lines do not intersect")]
    NoIntersection,

    /// A coordinate was NaN or infinite
    #[error("Non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// The offending x value.
        x: f64,
        /// The offending y value.
        y: f64,
    },

    /// A segment has zero length where a direction is required
    #[error("Degenerate segment: start and end coincide")]
    DegenerateSegment,

    /// The parameter combination cannot produce valid geometry
    #[error("Infeasible geometry: {0}")]
    Infeasible(String),

    /// A single parameter is out of its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl GeometryError {
    /// Create an infeasible-geometry error from a message
    pub fn infeasible(msg: impl Into<String>) -> Self {
        GeometryError::Infeasible(msg.into())
    }

    /// Create an invalid-parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Path error type
///
/// Represents wire-format parse failures and command sequencing violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Path text outside the supported grammar
    #[error("Path syntax error near '{fragment}': {reason}")]
    Syntax {
        /// The offending fragment of the input text.
        fragment: String,
        /// The reason the fragment was rejected.
        reason: String,
    },

    /// A command was appended where the path invariants forbid it
    #[error("Malformed path command {command}: {reason}")]
    MalformedCommand {
        /// The command letter that was rejected.
        command: char,
        /// The reason the command was rejected.
        reason: String,
    },
}

impl PathError {
    pub fn syntax(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        PathError::Syntax {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(command: char, reason: impl Into<String>) -> Self {
        PathError::MalformedCommand {
            command,
            reason: reason.into(),
        }
    }
}

/// Interval set error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntervalError {
    /// The interval set is unsorted, overlapping, touching, empty-ranged or non-finite
    #[error("Invalid interval set at entry {index}: {reason}")]
    InvalidSet {
        /// Index of the first offending entry.
        index: usize,
        /// The violated invariant.
        reason: String,
    },
}

impl IntervalError {
    pub fn invalid(index: usize, reason: impl Into<String>) -> Self {
        IntervalError::InvalidSet {
            index,
            reason: reason.into(),
        }
    }
}

/// Main error type for papernet
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Path error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Interval error
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

impl Error {
    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a path error
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this is an interval error
    pub fn is_interval_error(&self) -> bool {
        matches!(self, Error::Interval(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
