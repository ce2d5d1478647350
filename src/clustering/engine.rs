//! Complete-linkage agglomerative cluster engine
//!
//! Starts with every row as a singleton cluster and repeatedly merges the
//! pair with the smallest linkage score (maximum pairwise member distance,
//! which biases toward compact, well-separated clusters and avoids
//! chaining) until the active policy says stop. Merge order is fully
//! deterministic: score ties are broken by the lowest cluster-slot pair.

use crate::error::{Result, ZeitgeistError};
use ndarray::Array2;

/// Stopping policy for the agglomeration loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterPolicy {
    /// Merge until exactly `min(k, n)` clusters remain.
    FixedK(usize),
    /// Merge while the smallest linkage score stays below the threshold;
    /// the resulting cluster count is data-dependent (1..=n).
    AutoK(f64),
}

/// Hierarchical agglomerative clustering over a pairwise distance matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterEngine;

impl ClusterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Partition the `n` points behind a symmetric `n x n` distance matrix.
    ///
    /// Returns one label per point; labels are compact (`0..k`) and
    /// assigned in order of each cluster's lowest member position, so the
    /// labeling is stable across runs.
    pub fn cluster(&self, distances: &Array2<f64>, policy: ClusterPolicy) -> Result<Vec<usize>> {
        let n = distances.nrows();
        if n == 0 {
            return Err(ZeitgeistError::EmptyInput { stage: "cluster" });
        }
        if n == 1 {
            return Ok(vec![0]);
        }

        // Active singleton clusters; slot i keeps the lowest member index
        // of everything merged into it, since merges fold j into i < j.
        let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();
        let mut linkage = distances.clone();
        let mut active = n;

        let target = match policy {
            ClusterPolicy::FixedK(k) => k.max(1).min(n),
            ClusterPolicy::AutoK(_) => 1,
        };

        while active > target {
            let Some((score, i, j)) = Self::closest_pair(&members, &linkage) else {
                break;
            };

            if let ClusterPolicy::AutoK(threshold) = policy {
                if score >= threshold {
                    break;
                }
            }

            // Complete linkage: the merged cluster's distance to any other
            // cluster is the worse of the two parents' distances.
            for k in 0..members.len() {
                if members[k].is_none() || k == i || k == j {
                    continue;
                }
                let merged = linkage[[i, k]].max(linkage[[j, k]]);
                linkage[[i, k]] = merged;
                linkage[[k, i]] = merged;
            }

            let absorbed = members[j].take().expect("pair from active slots");
            members[i]
                .as_mut()
                .expect("pair from active slots")
                .extend(absorbed);
            active -= 1;
        }

        Ok(Self::compact_labels(&members, n))
    }

    /// Smallest linkage score among active cluster pairs, ties broken by
    /// the lowest (i, j) slot pair.
    fn closest_pair(
        members: &[Option<Vec<usize>>],
        linkage: &Array2<f64>,
    ) -> Option<(f64, usize, usize)> {
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..members.len() {
            if members[i].is_none() {
                continue;
            }
            for j in (i + 1)..members.len() {
                if members[j].is_none() {
                    continue;
                }
                let score = linkage[[i, j]];
                if best.map_or(true, |(b, _, _)| score < b) {
                    best = Some((score, i, j));
                }
            }
        }
        best
    }

    /// Assign compact labels 0..k in order of lowest member position.
    fn compact_labels(members: &[Option<Vec<usize>>], n: usize) -> Vec<usize> {
        let mut slots: Vec<&Vec<usize>> = members.iter().flatten().collect();
        slots.sort_by_key(|m| m.iter().min().copied().unwrap_or(usize::MAX));

        let mut labels = vec![0usize; n];
        for (label, slot) in slots.iter().enumerate() {
            for &point in slot.iter() {
                labels[point] = label;
            }
        }
        labels
    }
}
