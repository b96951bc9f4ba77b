//! Spatio-temporal DBSCAN driver.
//!
//! Pipeline: validate, build the grid (or skip it for the brute-force
//! scan), query every neighborhood, classify core points, expand clusters,
//! label.

use stdbscan_core::{Clustering, DbscanConfig, Error, Metric, Point, PointBatch, Result};

use crate::core_samples::CoreSamples;
use crate::expansion::{finish_labels, ClusterExpander};
use crate::grid::GridIndex;
use crate::neighborhood::{
    compute_neighborhoods, BruteForceSearch, GridSearch, Neighborhoods, QueryContext,
};

/// Largest input accepted; labels are `i32`.
#[allow(clippy::cast_sign_loss)]
const MAX_POINTS: usize = i32::MAX as usize;

/// Density clustering over (x, y, t) points.
#[derive(Debug, Clone, Default)]
pub struct StDbscan {
    config: DbscanConfig,
}

impl StDbscan {
    /// Create with custom configuration.
    #[must_use]
    pub fn new(config: DbscanConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &DbscanConfig {
        &self.config
    }

    /// Computes the epsilon-neighborhood of every point.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedMetric`] or [`Error::InvalidParameter`]
    /// for a bad configuration, [`Error::InvalidPoint`] or
    /// [`Error::LengthMismatch`] for bad input, and
    /// [`Error::ResourceLimitExceeded`] when the grid would be too large.
    pub fn neighborhoods(&self, batch: &PointBatch) -> Result<Neighborhoods> {
        let config = &self.config;
        config.validate()?;
        batch.validate()?;
        if batch.len() > MAX_POINTS {
            return Err(Error::ResourceLimitExceeded {
                resource: "point count",
                requested: batch.len() as u128,
                limit: MAX_POINTS as u128,
            });
        }

        let ctx = match config.metric {
            Metric::Euclidean => QueryContext::euclidean(batch, config.eps, config.time_window()),
            Metric::Haversine => return Err(Error::UnsupportedMetric(config.metric.to_string())),
        };

        if config.use_index {
            let grid = GridIndex::build(batch, config.eps, config.max_grid_cells)?;
            Ok(compute_neighborhoods(
                &GridSearch::new(ctx, &grid),
                config.parallel,
            ))
        } else {
            Ok(compute_neighborhoods(
                &BruteForceSearch::new(ctx),
                config.parallel,
            ))
        }
    }

    /// Clusters a batch of points.
    ///
    /// # Errors
    /// Same as [`StDbscan::neighborhoods`]. An empty batch is not an error.
    pub fn cluster(&self, batch: &PointBatch) -> Result<Clustering> {
        let neighborhoods = self.neighborhoods(batch)?;
        let core = CoreSamples::classify(&neighborhoods, self.config.min_samples);
        let (labels, n_clusters) = ClusterExpander::new(&neighborhoods, &core).expand();
        let result = finish_labels(core, labels, n_clusters);

        let stats = result.statistics();
        log::debug!(
            "dbscan: {} points, {} core, {} border, {} noise, {} clusters",
            stats.points_processed,
            stats.core_points,
            stats.border_points,
            stats.noise_points,
            stats.clusters_found
        );
        Ok(result)
    }
}

/// Clusters `points` with the given configuration.
///
/// # Errors
/// See [`StDbscan::neighborhoods`].
pub fn cluster(points: &[Point], config: &DbscanConfig) -> Result<Clustering> {
    let batch: PointBatch = points.iter().copied().collect();
    StDbscan::new(config.clone()).cluster(&batch)
}
