//! Representative selection: nearest member to each cluster centroid
//!
//! The centroid-nearest rule is cheap (one pass per cluster once the
//! centroid is known) and stable under small perturbations of the corpus,
//! which a medoid rule is not.

use crate::clustering::distance::cosine_distance;
use crate::clustering::types::{round_confidence, Cluster, Representative};
use crate::corpus::Corpus;
use crate::error::{Result, ZeitgeistError};
use ndarray::{Array2, ArrayView1};

/// Group labeled rows into `Cluster` values with centroids.
///
/// Labels are assumed compact (`0..k`), as the engine produces them.
pub fn group_clusters(labels: &[usize], features: &Array2<f64>) -> Vec<Cluster> {
    let k = labels.iter().max().map_or(0, |m| m + 1);
    let dim = features.ncols();

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (pos, &label) in labels.iter().enumerate() {
        members[label].push(pos);
    }

    members
        .into_iter()
        .enumerate()
        .map(|(label, members)| {
            let mut centroid = vec![0.0f64; dim];
            for &pos in &members {
                for (c, v) in centroid.iter_mut().zip(features.row(pos)) {
                    *c += v;
                }
            }
            let count = members.len() as f64;
            for c in centroid.iter_mut() {
                *c /= count;
            }
            Cluster {
                label,
                members,
                centroid,
            }
        })
        .collect()
}

/// Pick one representative per cluster: the member vector closest to the
/// centroid by cosine distance, ties broken by lowest corpus position.
pub fn select_representatives(
    clusters: &[Cluster],
    features: &Array2<f64>,
    corpus: &Corpus,
) -> Result<Vec<Representative>> {
    clusters
        .iter()
        .map(|cluster| {
            let centroid = ArrayView1::from(cluster.centroid.as_slice());
            let mut best_pos = None;
            let mut best_distance = f64::INFINITY;
            for &pos in &cluster.members {
                let distance = cosine_distance(features.row(pos), centroid);
                // Strict less-than keeps the lowest position on ties.
                if distance < best_distance {
                    best_distance = distance;
                    best_pos = Some(pos);
                }
            }

            let pos = best_pos.ok_or(ZeitgeistError::EmptyInput { stage: "select" })?;
            let record = corpus
                .get(pos)
                .ok_or(ZeitgeistError::EmptyInput { stage: "select" })?
                .clone();

            Ok(Representative {
                cardinality: cluster.size(),
                confidence: round_confidence(1.0 - best_distance),
                record,
            })
        })
        .collect()
}
