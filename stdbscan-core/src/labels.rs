//! Clustering results.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Label given to points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Summary counts for a finished clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringStatistics {
    /// Number of input points.
    pub points_processed: usize,
    /// Points whose neighborhood reached `min_samples`.
    pub core_points: usize,
    /// Non-core points assigned to a cluster.
    pub border_points: usize,
    /// Points labeled [`NOISE`].
    pub noise_points: usize,
    /// Number of distinct clusters.
    pub clusters_found: usize,
}

/// Output of a clustering run: core samples and per-point labels.
///
/// `labels[i]` is the cluster id of point `i`, in `0..n_clusters`, or
/// [`NOISE`]. `core_sample_indices` is ascending and duplicate free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Clustering {
    /// Indices of core points, ascending.
    pub core_sample_indices: Vec<usize>,
    /// Per-point cluster label.
    pub labels: Vec<i32>,
    /// Number of clusters; labels span `0..n_clusters`.
    pub n_clusters: usize,
}

impl Clustering {
    /// Number of labeled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no points were clustered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if point `index` is a core sample.
    #[must_use]
    pub fn is_core(&self, index: usize) -> bool {
        self.core_sample_indices.binary_search(&index).is_ok()
    }

    /// Indices of points labeled as noise.
    #[must_use]
    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == NOISE)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of points in each cluster, indexed by cluster id.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in &self.labels {
            if let Ok(id) = usize::try_from(label) {
                sizes[id] += 1;
            }
        }
        sizes
    }

    /// Indices of the points carrying label `cluster_id`, ascending.
    #[must_use]
    pub fn cluster_members(&self, cluster_id: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| usize::try_from(label).is_ok_and(|id| id == cluster_id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Summary counts for this result.
    #[must_use]
    pub fn statistics(&self) -> ClusteringStatistics {
        let noise_points = self.labels.iter().filter(|&&label| label == NOISE).count();
        let core_points = self.core_sample_indices.len();
        ClusteringStatistics {
            points_processed: self.labels.len(),
            core_points,
            border_points: self.labels.len() - noise_points - core_points,
            noise_points,
            clusters_found: self.n_clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Clustering {
        Clustering {
            core_sample_indices: vec![0, 1, 4],
            labels: vec![0, 0, 0, NOISE, 1, 1],
            n_clusters: 2,
        }
    }

    #[test]
    fn test_clustering_queries() {
        let result = sample();
        assert_eq!(result.len(), 6);
        assert!(result.is_core(4));
        assert!(!result.is_core(2));
        assert_eq!(result.noise_indices(), vec![3]);
        assert_eq!(result.cluster_sizes(), vec![3, 2]);
        assert_eq!(result.cluster_members(1), vec![4, 5]);
        assert!(result.cluster_members(7).is_empty());
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(
            stats,
            ClusteringStatistics {
                points_processed: 6,
                core_points: 3,
                border_points: 2,
                noise_points: 1,
                clusters_found: 2,
            }
        );
        assert_eq!(Clustering::default().statistics(), ClusteringStatistics::default());
    }
}
