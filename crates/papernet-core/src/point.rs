//! Canonical 2D point type
//!
//! A `Point` doubles as a displacement vector for the hinged-plot algebra.
//! Coordinates are validated on construction; arithmetic between finite
//! points stays finite for every magnitude a dieline can reach.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::GeometryError;

/// Tolerance used when comparing coordinates produced by construction
pub const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointRepr")]
pub struct Point {
    x: f64,
    y: f64,
}

/// Accepted input shapes: `{ "x": 1, "y": 2 }` or `[1, 2]`
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Record { x: f64, y: f64 },
    Tuple([f64; 2]),
}

impl TryFrom<PointRepr> for Point {
    type Error = GeometryError;

    fn try_from(repr: PointRepr) -> Result<Self, Self::Error> {
        match repr {
            PointRepr::Record { x, y } => Point::new(x, y),
            PointRepr::Tuple([x, y]) => Point::new(x, y),
        }
    }
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point, rejecting NaN and infinite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, GeometryError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(GeometryError::NonFiniteCoordinate { x, y })
        }
    }

    /// Point at `length` along `angle` (radians) from the origin.
    pub fn from_polar(angle: f64, length: f64) -> Result<Self, GeometryError> {
        Point::new(length * angle.cos(), length * angle.sin())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Re-check finiteness after a chain of arithmetic.
    pub fn validated(self) -> Result<Self, GeometryError> {
        Point::new(self.x, self.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Angle of the vector from the origin, in radians.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Unit vector in the same direction; the +x axis for a zero vector.
    pub fn unit(&self) -> Self {
        let length = self.length();
        if length < EPSILON {
            Point { x: 1.0, y: 0.0 }
        } else {
            *self / length
        }
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::ORIGIN
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point {
            x: -self.x,
            y: -self.y,
        }
    }
}
