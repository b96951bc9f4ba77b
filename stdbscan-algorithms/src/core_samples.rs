//! Core point classification.

use crate::neighborhood::Neighborhoods;

/// Core samples of a run and their position in the core set.
///
/// A point is core iff its neighborhood (itself included) has at least
/// `min_samples` members. Fixed once computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreSamples {
    indices: Vec<usize>,
    rank: Vec<Option<usize>>,
}

impl CoreSamples {
    /// Classifies every point from its neighborhood size.
    #[must_use]
    pub fn classify(neighborhoods: &Neighborhoods, min_samples: usize) -> Self {
        let mut indices = Vec::new();
        let rank = neighborhoods
            .sizes()
            .enumerate()
            .map(|(k, size)| {
                (size >= min_samples).then(|| {
                    indices.push(k);
                    indices.len() - 1
                })
            })
            .collect();
        Self { indices, rank }
    }

    /// Core point indices, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of core points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no point is core.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns true if point `k` is core.
    #[must_use]
    pub fn is_core(&self, k: usize) -> bool {
        self.rank(k).is_some()
    }

    /// Position of point `k` within the core set, if it is core.
    #[must_use]
    pub fn rank(&self, k: usize) -> Option<usize> {
        self.rank.get(k).copied().flatten()
    }

    /// Consumes the classification, returning the ascending core indices.
    #[must_use]
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let neighborhoods =
            Neighborhoods::from_lists(vec![vec![0, 1], vec![0, 1, 2], vec![1, 2], vec![3]]);

        let core = CoreSamples::classify(&neighborhoods, 2);
        assert_eq!(core.indices(), &[0, 1, 2]);
        assert_eq!(core.rank(1), Some(1));
        assert_eq!(core.rank(3), None);
        assert!(!core.is_core(3));
        assert!(!core.is_core(10));

        let core = CoreSamples::classify(&neighborhoods, 3);
        assert_eq!(core.indices(), &[1]);
        assert_eq!(core.rank(1), Some(0));

        let core = CoreSamples::classify(&neighborhoods, 1);
        assert_eq!(core.len(), 4);
        assert_eq!(core.into_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_classify_empty() {
        let core = CoreSamples::classify(&Neighborhoods::default(), 1);
        assert!(core.is_empty());
    }
}
