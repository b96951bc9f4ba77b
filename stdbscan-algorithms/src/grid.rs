//! Uniform spatial grid over the (x, y) plane.
//!
//! Cells are exactly `eps` wide, so every point within `eps` of a query
//! point lies in the 3x3 block of cells around the query point's cell.
//! Cell coordinates are computed in floating point, so the block is widened
//! by one cell on a side whenever the query point sits within rounding
//! distance of a cell boundary. The grid only answers spatial candidacy;
//! time is filtered later.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use stdbscan_core::{Error, PointBatch, Result};

/// Cell and candidate window of one point along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisSpan {
    cell: usize,
    lo: usize,
    hi: usize,
}

impl AxisSpan {
    /// Locates coordinate `v` on an axis starting at `min` with `cells` cells.
    ///
    /// `lo..=hi` covers every cell a coordinate within `eps` of `v` can be
    /// assigned to, including the rounding error of both cell computations
    /// and of the exact distance test.
    fn locate(v: f64, min: f64, eps: f64, cells: usize) -> Self {
        let u = (v - min) / eps;
        let slack = 8.0 * f64::EPSILON * ((v.abs() + min.abs()) / eps + 2.0);
        let last = cells - 1;
        Self {
            cell: (u.floor().max(0.0) as usize).min(last),
            lo: ((u - 1.0 - slack).floor().max(0.0) as usize).min(last),
            hi: ((u + 1.0 + slack).floor().max(0.0) as usize).min(last),
        }
    }
}

/// Point indices bucketed into uniform cells, stored in row-major order.
///
/// Points of cell `c` are `entries[cell_start[c]..cell_start[c + 1]]`,
/// ascending by point index. Immutable after [`GridIndex::build`].
#[derive(Debug, Clone)]
pub struct GridIndex {
    cols: usize,
    rows: usize,
    cell_start: Vec<usize>,
    entries: Vec<usize>,
    spans: Vec<(AxisSpan, AxisSpan)>,
}

impl GridIndex {
    /// Buckets every point of `batch` into cells of side `eps`.
    ///
    /// The grid spans the bounding rectangle of the batch with
    /// `floor((max - min) / eps) + 1` cells per axis, so an axis on which
    /// all points share one coordinate gets a single cell.
    ///
    /// # Errors
    /// Returns [`Error::ResourceLimitExceeded`] if the grid would need more
    /// than `max_cells` cells.
    pub fn build(batch: &PointBatch, eps: f64, max_cells: usize) -> Result<Self> {
        let Some(bounds) = batch.bounds() else {
            return Ok(Self {
                cols: 1,
                rows: 1,
                cell_start: vec![0, 0],
                entries: Vec::new(),
                spans: Vec::new(),
            });
        };

        let cols_f = ((bounds.max_x - bounds.min_x) / eps).floor() + 1.0;
        let rows_f = ((bounds.max_y - bounds.min_y) / eps).floor() + 1.0;
        let total_f = cols_f * rows_f;
        if !total_f.is_finite() || total_f > max_cells as f64 {
            // `as` saturates, so an infinite request reports u128::MAX.
            return Err(Error::ResourceLimitExceeded {
                resource: "grid cells",
                requested: total_f as u128,
                limit: max_cells as u128,
            });
        }
        let cols = cols_f as usize;
        let rows = rows_f as usize;
        let total_cells = cols * rows;

        let spans: Vec<(AxisSpan, AxisSpan)> = batch
            .x
            .iter()
            .zip(&batch.y)
            .map(|(&x, &y)| {
                (
                    AxisSpan::locate(x, bounds.min_x, eps, cols),
                    AxisSpan::locate(y, bounds.min_y, eps, rows),
                )
            })
            .collect();

        // Counting sort into row-major cells.
        let mut cell_start = vec![0usize; total_cells + 1];
        for (sx, sy) in &spans {
            cell_start[sy.cell * cols + sx.cell + 1] += 1;
        }
        for c in 0..total_cells {
            cell_start[c + 1] += cell_start[c];
        }
        let mut cursor = cell_start[..total_cells].to_vec();
        let mut entries = vec![0usize; spans.len()];
        for (i, (sx, sy)) in spans.iter().enumerate() {
            let slot = &mut cursor[sy.cell * cols + sx.cell];
            entries[*slot] = i;
            *slot += 1;
        }

        log::debug!(
            "grid index: {} points in {}x{} cells (eps={})",
            spans.len(),
            cols,
            rows,
            eps
        );

        Ok(Self {
            cols,
            rows,
            cell_start,
            entries,
            spans,
        })
    }

    /// Grid dimensions as `(cols, rows)`.
    #[must_use]
    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Cell coordinates `(i, j)` of point `k`.
    #[must_use]
    pub fn cell_of(&self, k: usize) -> Option<(usize, usize)> {
        self.spans.get(k).map(|(sx, sy)| (sx.cell, sy.cell))
    }

    /// Points bucketed into cell `(i, j)`.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> &[usize] {
        if i >= self.cols || j >= self.rows {
            return &[];
        }
        let c = j * self.cols + i;
        &self.entries[self.cell_start[c]..self.cell_start[c + 1]]
    }

    /// All points in the 3x3 block of cells centered on point `k`'s cell.
    ///
    /// The block is clamped at the grid edges; it never wraps. Near a cell
    /// boundary it grows by one cell so that rounding cannot hide a point
    /// within `eps`. Point `k` itself is included.
    pub fn cells_near(&self, k: usize) -> impl Iterator<Item = usize> + '_ {
        let (sx, sy) = self.spans[k];
        let (x_lo, x_hi) = (sx.lo, sx.hi);
        (sy.lo..=sy.hi).flat_map(move |row| {
            // Cells of one row are contiguous in row-major order.
            let start = self.cell_start[row * self.cols + x_lo];
            let end = self.cell_start[row * self.cols + x_hi + 1];
            self.entries[start..end].iter().copied()
        })
    }
}
