//! Clustering configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance metric used for the spatial part of the neighborhood test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    /// Axis-aligned Euclidean distance in the (x, y) plane.
    #[default]
    Euclidean,
    /// Great-circle distance on the sphere. Reserved, not implemented.
    Haversine,
}

impl Metric {
    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Haversine => "haversine",
        }
    }

    /// Returns true if clustering can run with this metric.
    #[must_use]
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::Euclidean)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "haversine" | "spherical" => Ok(Self::Haversine),
            _ => Err(Error::UnsupportedMetric(s.to_string())),
        }
    }
}

/// Configuration for a spatio-temporal DBSCAN run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DbscanConfig {
    /// Maximum spatial distance for two points to be neighbors.
    pub eps: f64,
    /// Minimum neighborhood size (the point itself included) for a core point.
    pub min_samples: usize,
    /// Multiplier turning `eps` into the temporal window width.
    pub time_scale: f64,
    /// Spatial metric.
    pub metric: Metric,
    /// Use the uniform grid index instead of the brute-force scan.
    pub use_index: bool,
    /// Run the neighborhood query phase on the rayon thread pool.
    pub parallel: bool,
    /// Upper bound on the number of grid cells the index may allocate.
    pub max_grid_cells: usize,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            eps: 1.0,
            min_samples: 5,
            time_scale: 1.0,
            metric: Metric::Euclidean,
            use_index: true,
            parallel: true,
            max_grid_cells: 1 << 24,
        }
    }
}

impl DbscanConfig {
    /// Creates a configuration with the given radius and density threshold.
    #[must_use]
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            eps,
            min_samples,
            ..Self::default()
        }
    }

    /// Sets the spatial epsilon value.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the minimum neighborhood size.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Sets the time scale.
    #[must_use]
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Sets the metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Chooses between the grid index and the brute-force scan.
    #[must_use]
    pub fn with_index(mut self, use_index: bool) -> Self {
        self.use_index = use_index;
        self
    }

    /// Set whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the grid cell limit.
    #[must_use]
    pub fn with_max_grid_cells(mut self, max_grid_cells: usize) -> Self {
        self.max_grid_cells = max_grid_cells;
        self
    }

    /// Width of the temporal window, `eps * time_scale`.
    #[must_use]
    pub fn time_window(&self) -> f64 {
        self.eps * self.time_scale
    }

    /// Checks the configuration before any work is done.
    ///
    /// The metric is checked first so an unimplemented metric is reported
    /// even when other fields are also wrong.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedMetric`] or [`Error::InvalidParameter`].
    pub fn validate(&self) -> Result<()> {
        if !self.metric.is_implemented() {
            return Err(Error::UnsupportedMetric(self.metric.to_string()));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(Error::invalid_parameter(
                "eps",
                format!("must be a positive finite number, got {}", self.eps),
            ));
        }
        if self.min_samples < 1 {
            return Err(Error::invalid_parameter("min_samples", "must be at least 1"));
        }
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Err(Error::invalid_parameter(
                "time_scale",
                format!("must be a positive finite number, got {}", self.time_scale),
            ));
        }
        if self.max_grid_cells < 1 {
            return Err(Error::invalid_parameter(
                "max_grid_cells",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
