//! stdbscan-core: Core types for spatio-temporal density clustering.
//!
//! This crate provides the point model, run configuration, result types
//! and errors shared by the clustering algorithms.
//!

pub mod config;
pub mod error;
pub mod labels;
pub mod point;
pub mod soa;

pub use config::{DbscanConfig, Metric};
pub use error::{Error, Result};
pub use labels::{Clustering, ClusteringStatistics, NOISE};
pub use point::{Point, SpatioTemporal};
pub use soa::{Bounds, PointBatch};
