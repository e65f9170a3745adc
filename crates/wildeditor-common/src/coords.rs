//! Coordinate and bounding-box types for the wilderness grid.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Smallest coordinate value on either axis.
pub const WORLD_MIN: f64 = -1024.0;

/// Largest coordinate value on either axis.
pub const WORLD_MAX: f64 = 1024.0;

/// A position on the wilderness grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// X coordinate (west to east)
    pub x: f64,
    /// Y coordinate (south to north)
    pub y: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-world values.
    pub fn checked(x: f64, y: f64) -> Result<Self, ValidationError> {
        let coord = Self::new(x, y);
        coord.validate()?;
        Ok(coord)
    }

    /// Checks that both axes are finite and inside `[WORLD_MIN, WORLD_MAX]`.
    pub fn validate(self) -> Result<(), ValidationError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate);
        }
        if !self.in_bounds() {
            return Err(ValidationError::CoordinateOutOfBounds {
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }

    /// Returns true if both axes lie inside the world.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (WORLD_MIN..=WORLD_MAX).contains(&self.x) && (WORLD_MIN..=WORLD_MAX).contains(&self.y)
    }

    /// Euclidean distance to another coordinate.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Returns true if both axes differ by less than `tolerance`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }

    /// Converts to a glam vector for arithmetic.
    #[must_use]
    pub const fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Coordinate {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: Coordinate,
    /// Maximum corner
    pub max: Coordinate,
}

impl Bounds {
    /// Creates a box from two corners, normalizing their order.
    #[must_use]
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min: Coordinate::new(a.x.min(b.x), a.y.min(b.y)),
            max: Coordinate::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Box of the given radius around a point.
    #[must_use]
    pub fn around(center: Coordinate, radius: f64) -> Self {
        let r = radius.max(0.0);
        Self {
            min: Coordinate::new(center.x - r, center.y - r),
            max: Coordinate::new(center.x + r, center.y + r),
        }
    }

    /// Smallest box enclosing all points, or `None` when empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| b.include(*p)))
    }

    /// Grows the box to include a point.
    #[must_use]
    pub fn include(self, p: Coordinate) -> Self {
        Self {
            min: Coordinate::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Coordinate::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Grows the box by `radius` on every side.
    #[must_use]
    pub fn expand(self, radius: f64) -> Self {
        let r = radius.max(0.0);
        Self {
            min: Coordinate::new(self.min.x - r, self.min.y - r),
            max: Coordinate::new(self.max.x + r, self.max.y + r),
        }
    }

    /// Width along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if the two boxes overlap (touching counts).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
