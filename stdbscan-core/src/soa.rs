//! Structure of Arrays (`SoA`) point storage.
//!
//! `PointBatch` keeps x, y and t in parallel vectors rather than a vector of
//! points. Neighbor queries touch one or two columns at a time, so the
//! columnar layout keeps the hot loops cache friendly.

use crate::error::{Error, Result};
use crate::point::{Point, SpatioTemporal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle of a batch in the (x, y) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Smallest x coordinate.
    pub min_x: f64,
    /// Largest x coordinate.
    pub max_x: f64,
    /// Smallest y coordinate.
    pub min_y: f64,
    /// Largest y coordinate.
    pub max_y: f64,
}

/// A batch of points stored in Structure of Arrays (`SoA`) format.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointBatch {
    /// Columnar storage for X coordinates.
    pub x: Vec<f64>,
    /// Columnar storage for Y coordinates.
    pub y: Vec<f64>,
    /// Columnar storage for timestamps.
    pub t: Vec<f64>,
}

impl PointBatch {
    /// Creates a new empty batch with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            t: Vec::with_capacity(capacity),
        }
    }

    /// Builds a batch from three columns of equal length.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the columns differ in length.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>, t: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() || x.len() != t.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
                t: t.len(),
            });
        }
        Ok(Self { x, y, t })
    }

    /// Builds a batch from any records exposing spatio-temporal coordinates.
    pub fn from_records<'a, R, I>(records: I) -> Self
    where
        R: SpatioTemporal + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().map(SpatioTemporal::to_point).collect()
    }

    /// Returns the number of points in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Clears all vectors in the batch.
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.t.clear();
    }

    /// Appends all points from another batch to this one.
    pub fn append(&mut self, other: &PointBatch) {
        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
        self.t.extend_from_slice(&other.t);
    }

    /// Pushes a single point into the batch.
    pub fn push(&mut self, point: impl Into<Point>) {
        let point = point.into();
        self.x.push(point.x);
        self.y.push(point.y);
        self.t.push(point.t);
    }

    /// Returns the point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point> {
        Some(Point::new(
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.t.get(index)?,
        ))
    }

    /// Iterates over the points in input order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.t)
            .map(|((&x, &y), &t)| Point::new(x, y, t))
    }

    /// Checks that the columns line up and every coordinate is finite.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] for ragged columns or
    /// [`Error::InvalidPoint`] for the first point with a NaN or infinite
    /// coordinate.
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() || self.x.len() != self.t.len() {
            return Err(Error::LengthMismatch {
                x: self.x.len(),
                y: self.y.len(),
                t: self.t.len(),
            });
        }
        match self.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(Error::InvalidPoint {
                index,
                reason: "coordinates must be finite",
            }),
            None => Ok(()),
        }
    }

    /// Spatial bounding rectangle, or `None` for an empty batch.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        let (min_x, max_x) = min_max(&self.x);
        let (min_y, max_y) = min_max(&self.y);
        Some(Bounds {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

impl FromIterator<Point> for PointBatch {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        for point in iter {
            batch.push(point);
        }
        batch
    }
}

impl FromIterator<(f64, f64, f64)> for PointBatch {
    fn from_iter<I: IntoIterator<Item = (f64, f64, f64)>>(iter: I) -> Self {
        iter.into_iter().map(Point::from).collect()
    }
}
