//! stdbscan-algorithms: Spatio-temporal DBSCAN with a uniform grid index.
//!
//! This crate provides the clustering pipeline:
//! - **Grid** - uniform `eps`-sized cells for 3x3 candidate lookup
//! - **Neighborhood** - exact time-window and circular distance filters,
//!   indexed or brute force, run in parallel with rayon
//! - **Core samples** - points whose neighborhood reaches `min_samples`
//! - **Expansion** - density-reachable flood fill with border points
//!   labeled but not expanded
//!
#![warn(missing_docs)]

mod core_samples;
mod dbscan;
mod expansion;
pub mod grid;
pub mod neighborhood;

pub use core_samples::CoreSamples;
pub use dbscan::{cluster, StDbscan};
pub use expansion::{finish_labels, ClusterExpander};
pub use grid::GridIndex;
pub use neighborhood::{
    compute_neighborhoods, BruteForceSearch, GridSearch, NeighborSearch, Neighborhoods,
    QueryContext,
};

// Re-export core types
pub use stdbscan_core::{
    Clustering, ClusteringStatistics, DbscanConfig, Error, Metric, Point, PointBatch, Result,
    NOISE,
};
