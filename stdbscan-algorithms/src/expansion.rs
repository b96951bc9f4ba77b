//! Density-reachability expansion and final labeling.
//!
//! Expansion runs single threaded: each state transition depends on the
//! current state of the neighbors, so the label and status arrays are
//! mutated in place by one frontier loop.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::collections::VecDeque;

use stdbscan_core::{Clustering, NOISE};

use crate::core_samples::CoreSamples;
use crate::neighborhood::Neighborhoods;

/// Expansion status of a core point. Non-core points carry no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoreStatus {
    Unhandled,
    Pending,
    Added,
}

/// Flood-fills clusters through chains of core points.
///
/// Status is kept per core point (indexed by core rank), not per input
/// point. Border points are labeled by the first cluster that reaches them
/// and never expanded.
pub struct ClusterExpander<'a> {
    neighborhoods: &'a Neighborhoods,
    core: &'a CoreSamples,
}

impl<'a> ClusterExpander<'a> {
    /// Creates an expander over precomputed neighborhoods and core samples.
    #[must_use]
    pub fn new(neighborhoods: &'a Neighborhoods, core: &'a CoreSamples) -> Self {
        Self {
            neighborhoods,
            core,
        }
    }

    /// Runs the expansion and returns `(labels, n_clusters)`.
    ///
    /// Clusters are seeded from unhandled core points in ascending index
    /// order and the frontier is processed first in, first out, so label
    /// numbering is stable for a fixed input order.
    #[must_use]
    pub fn expand(&self) -> (Vec<i32>, usize) {
        let mut labels = vec![NOISE; self.neighborhoods.len()];
        let mut status = vec![CoreStatus::Unhandled; self.core.len()];
        let mut frontier = VecDeque::new();
        let mut n_clusters = 0usize;

        for (seed_rank, &seed) in self.core.indices().iter().enumerate() {
            if status[seed_rank] != CoreStatus::Unhandled {
                continue;
            }
            let label = n_clusters as i32;
            n_clusters += 1;

            status[seed_rank] = CoreStatus::Pending;
            labels[seed] = label;
            frontier.push_back((seed, seed_rank));

            let mut members = 1usize;
            while let Some((p, rank)) = frontier.pop_front() {
                status[rank] = CoreStatus::Added;

                for &q in self.neighborhoods.get(p) {
                    if labels[q] == NOISE {
                        labels[q] = label;
                        members += 1;
                    }
                    if let Some(q_rank) = self.core.rank(q) {
                        if status[q_rank] == CoreStatus::Unhandled {
                            status[q_rank] = CoreStatus::Pending;
                            frontier.push_back((q, q_rank));
                        }
                    }
                }
            }
            log::trace!("cluster {label}: seeded at point {seed}, {members} points");
        }

        (labels, n_clusters)
    }
}

/// Combines the core samples and expansion output into a [`Clustering`].
#[must_use]
pub fn finish_labels(core: CoreSamples, labels: Vec<i32>, n_clusters: usize) -> Clustering {
    Clustering {
        core_sample_indices: core.into_indices(),
        labels,
        n_clusters,
    }
}
