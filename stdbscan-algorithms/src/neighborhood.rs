//! Exact epsilon-neighborhood queries.
//!
//! Two strategies produce the same neighborhoods: [`GridSearch`] draws
//! candidates from a [`GridIndex`], [`BruteForceSearch`] scans every point
//! behind a bounding-box prefilter. Both finish with the same exact time
//! window and circular distance test, and both emit ascending indices.

use rayon::prelude::*;
use stdbscan_core::{Point, PointBatch};

use crate::grid::GridIndex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ragged array of per-point neighborhoods.
///
/// Neighborhood `k` is `indices[offsets[k]..offsets[k + 1]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neighborhoods {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl Neighborhoods {
    /// Flattens one list per point into the ragged layout.
    #[must_use]
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        let total = lists.iter().map(Vec::len).sum();
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut indices = Vec::with_capacity(total);
        offsets.push(0);
        for list in lists {
            indices.extend(list);
            offsets.push(indices.len());
        }
        Self { offsets, indices }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neighborhood of point `k`, ascending.
    ///
    /// # Panics
    /// Panics if `k >= self.len()`.
    #[must_use]
    pub fn get(&self, k: usize) -> &[usize] {
        &self.indices[self.offsets[k]..self.offsets[k + 1]]
    }

    /// Size of the neighborhood of point `k`.
    #[must_use]
    pub fn size(&self, k: usize) -> usize {
        self.offsets[k + 1] - self.offsets[k]
    }

    /// Neighborhood sizes in point order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.windows(2).map(|w| w[1] - w[0])
    }

    /// Iterates over the neighborhoods in point order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(|w| &self.indices[w[0]..w[1]])
    }

    /// Sum of all neighborhood sizes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.indices.len()
    }
}

/// Thresholds shared by every query of one run.
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    batch: &'a PointBatch,
    eps: f64,
    eps_sq: f64,
    time_window: f64,
}

impl<'a> QueryContext<'a> {
    /// Euclidean neighborhood test with radius `eps` and the given time window.
    #[must_use]
    pub fn euclidean(batch: &'a PointBatch, eps: f64, time_window: f64) -> Self {
        Self {
            batch,
            eps,
            eps_sq: eps * eps,
            time_window,
        }
    }

    /// Number of points in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Exact test: time window first, then the circular cutoff.
    #[inline]
    fn is_neighbor(&self, k: usize, c: usize) -> bool {
        let (query, candidate) = (self.at(k), self.at(c));
        candidate.time_diff(&query) <= self.time_window
            && candidate.distance_squared(&query) <= self.eps_sq
    }

    #[inline]
    fn at(&self, i: usize) -> Point {
        let b = self.batch;
        Point::new(b.x[i], b.y[i], b.t[i])
    }

    #[inline]
    fn in_box(&self, k: usize, c: usize) -> bool {
        let b = self.batch;
        (b.x[c] - b.x[k]).abs() <= self.eps && (b.y[c] - b.y[k]).abs() <= self.eps
    }
}

/// Strategy for computing one point's epsilon-neighborhood.
pub trait NeighborSearch: Sync {
    /// Number of points being searched.
    fn len(&self) -> usize;

    /// Returns true if there is nothing to search.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the ascending neighborhood of point `k` into `out`.
    ///
    /// `out` is cleared first. Point `k` is always part of its own
    /// neighborhood.
    fn query_into(&self, k: usize, out: &mut Vec<usize>);

    /// Returns the ascending neighborhood of point `k`.
    fn query(&self, k: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_into(k, &mut out);
        out
    }
}

/// Neighborhood queries accelerated by a [`GridIndex`].
pub struct GridSearch<'a> {
    ctx: QueryContext<'a>,
    grid: &'a GridIndex,
}

impl<'a> GridSearch<'a> {
    /// Pairs a query context with a grid built over the same batch.
    #[must_use]
    pub fn new(ctx: QueryContext<'a>, grid: &'a GridIndex) -> Self {
        Self { ctx, grid }
    }
}

impl NeighborSearch for GridSearch<'_> {
    fn len(&self) -> usize {
        self.ctx.len()
    }

    fn query_into(&self, k: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.grid
                .cells_near(k)
                .filter(|&c| self.ctx.is_neighbor(k, c)),
        );
        out.sort_unstable();
    }
}

/// Neighborhood queries without an index.
pub struct BruteForceSearch<'a> {
    ctx: QueryContext<'a>,
}

impl<'a> BruteForceSearch<'a> {
    /// Creates a full-scan search over the context's batch.
    #[must_use]
    pub fn new(ctx: QueryContext<'a>) -> Self {
        Self { ctx }
    }
}

impl NeighborSearch for BruteForceSearch<'_> {
    fn len(&self) -> usize {
        self.ctx.len()
    }

    fn query_into(&self, k: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            (0..self.ctx.len())
                .filter(|&c| self.ctx.in_box(k, c) && self.ctx.is_neighbor(k, c)),
        );
    }
}

/// Runs `search` for every point and collects the results.
///
/// Each query reads only immutable inputs and writes its own slot, so the
/// parallel path needs no locking.
pub fn compute_neighborhoods<S: NeighborSearch>(search: &S, parallel: bool) -> Neighborhoods {
    let n = search.len();
    let lists: Vec<Vec<usize>> = if parallel {
        (0..n).into_par_iter().map(|k| search.query(k)).collect()
    } else {
        (0..n).map(|k| search.query(k)).collect()
    };
    let neighborhoods = Neighborhoods::from_lists(lists);
    log::debug!(
        "neighborhood query: {} points, {} neighbor entries",
        neighborhoods.len(),
        neighborhoods.total_len()
    );
    neighborhoods
}
