//! Point traits and types for spatio-temporal data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single observation in the (x, y) plane at time t.
///
/// Points have no identity beyond their position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Timestamp.
    pub t: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Squared Euclidean distance to another point in the (x, y) plane.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Absolute time difference to another point.
    #[inline]
    #[must_use]
    pub fn time_diff(&self, other: &Self) -> f64 {
        (self.t - other.t).abs()
    }

    /// Returns true if all three coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

impl From<(f64, f64, f64)> for Point {
    #[inline]
    fn from((x, y, t): (f64, f64, f64)) -> Self {
        Self::new(x, y, t)
    }
}

impl From<[f64; 3]> for Point {
    #[inline]
    fn from([x, y, t]: [f64; 3]) -> Self {
        Self::new(x, y, t)
    }
}

/// Trait for records that can be clustered in space and time.
///
/// Lets callers feed their own record types into a [`PointBatch`]
/// without first copying them into [`Point`] values.
///
/// [`PointBatch`]: crate::soa::PointBatch
pub trait SpatioTemporal {
    /// Returns the x coordinate.
    fn x(&self) -> f64;

    /// Returns the y coordinate.
    fn y(&self) -> f64;

    /// Returns the timestamp.
    fn t(&self) -> f64;

    /// Returns the record as a plain point.
    #[inline]
    fn to_point(&self) -> Point {
        Point::new(self.x(), self.y(), self.t())
    }
}

impl SpatioTemporal for Point {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    fn t(&self) -> f64 {
        self.t
    }
}
