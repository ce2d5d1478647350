// Shared types for the clustering pipeline
use crate::corpus::Record;
use serde::{Deserialize, Serialize};

/// One cluster produced by the engine: its label, the corpus positions of
/// its members, and the derived centroid.
///
/// Clusters are read-only artifacts of one engine run; labels partition the
/// corpus positions exhaustively and without overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Compact label in 0..k
    pub label: usize,
    /// Corpus positions of member records, ascending
    pub members: Vec<usize>,
    /// Elementwise mean of member feature vectors
    pub centroid: Vec<f64>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// A representative record for one cluster.
///
/// The single output shape of the core: cardinality is the cluster size,
/// confidence is `1 - cosine_distance(member, centroid)` rounded to two
/// decimals, and the record is carried whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representative {
    /// Number of records this representative stands for
    pub cardinality: usize,
    /// Closeness of the representative to its cluster centroid, in [0, 1]
    pub confidence: f64,
    /// The selected record
    pub record: Record,
}

/// Round a confidence value to two decimals and clamp it into [0, 1].
pub fn round_confidence(value: f64) -> f64 {
    ((value.clamp(0.0, 1.0)) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_rounds_and_clamps() {
        assert_eq!(round_confidence(0.876), 0.88);
        assert_eq!(round_confidence(1.2), 1.0);
        assert_eq!(round_confidence(-0.3), 0.0);
        assert_eq!(round_confidence(0.005), 0.01);
    }
}
