//! Ranking assembly: turning per-cluster representatives into the final,
//! ordered output list
//!
//! Two policies. Topical runs take the N largest clusters. Sentiment runs
//! build a fixed six-slot composition: the most-positive, most-negative,
//! and most-neutral clusters by mean compound score, then the three
//! largest remaining clusters. Both degrade to shorter (or padded) output
//! with a warning when the data yields too few clusters.

use crate::clustering::{Cluster, Representative};
use crate::error::PipelineWarning;

/// Number of extreme slots in the sentiment composition.
const SENTIMENT_EXTREMES: usize = 3;
/// Number of largest-remaining slots in the sentiment composition.
const SENTIMENT_LARGEST: usize = 3;
/// Compound-score targets for the extreme slots, in output order:
/// most positive, most negative, most neutral.
const EXTREME_TARGETS: [f64; SENTIMENT_EXTREMES] = [1.0, -1.0, 0.0];

/// Assembled output of one pass.
#[derive(Debug, Clone)]
pub struct AssemblyOutcome {
    pub representatives: Vec<Representative>,
    pub warnings: Vec<PipelineWarning>,
}

/// Sort clusters by cardinality descending and keep the representatives of
/// the first `top_n`. A short result is flagged, never an error.
pub fn assemble_topical(
    clusters: &[Cluster],
    representatives: &[Representative],
    top_n: usize,
) -> AssemblyOutcome {
    debug_assert_eq!(clusters.len(), representatives.len());

    let mut order: Vec<usize> = (0..clusters.len()).collect();
    // Ties by label keep the ordering deterministic.
    order.sort_by(|&a, &b| {
        clusters[b]
            .size()
            .cmp(&clusters[a].size())
            .then(clusters[a].label.cmp(&clusters[b].label))
    });

    let selected: Vec<Representative> = order
        .iter()
        .take(top_n)
        .map(|&i| representatives[i].clone())
        .collect();

    let mut warnings = Vec::new();
    if selected.len() < top_n {
        tracing::warn!(
            requested = top_n,
            available = selected.len(),
            "Fewer clusters than requested"
        );
        warnings.push(PipelineWarning::FewerClustersThanRequested {
            requested: top_n,
            available: selected.len(),
        });
    }

    AssemblyOutcome {
        representatives: selected,
        warnings,
    }
}

/// Build the six-slot sentiment composition.
///
/// `mean_compounds[label]` is the mean compound polarity of that cluster's
/// members. Slots are filled in order: the single cluster closest to +1,
/// then to -1, then to 0 (without reuse), then the three largest remaining
/// clusters by cardinality. When fewer than six clusters exist the result
/// is padded by repeating the lowest-confidence representative already
/// selected, and a warning is attached.
pub fn assemble_sentiment(
    clusters: &[Cluster],
    representatives: &[Representative],
    mean_compounds: &[f64],
) -> AssemblyOutcome {
    debug_assert_eq!(clusters.len(), representatives.len());
    debug_assert_eq!(clusters.len(), mean_compounds.len());

    let total_slots = SENTIMENT_EXTREMES + SENTIMENT_LARGEST;
    let mut used = vec![false; clusters.len()];
    let mut selected: Vec<Representative> = Vec::with_capacity(total_slots);

    // Extreme slots, one axis at a time.
    for target in EXTREME_TARGETS {
        let pick = (0..clusters.len())
            .filter(|&i| !used[i])
            .min_by(|&a, &b| {
                let da = (mean_compounds[a] - target).abs();
                let db = (mean_compounds[b] - target).abs();
                da.partial_cmp(&db)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(clusters[a].label.cmp(&clusters[b].label))
            });
        if let Some(i) = pick {
            used[i] = true;
            selected.push(representatives[i].clone());
        }
    }

    // Largest remaining clusters by cardinality, ties by label.
    let mut remaining: Vec<usize> = (0..clusters.len()).filter(|&i| !used[i]).collect();
    remaining.sort_by(|&a, &b| {
        clusters[b]
            .size()
            .cmp(&clusters[a].size())
            .then(clusters[a].label.cmp(&clusters[b].label))
    });
    for &i in remaining.iter().take(SENTIMENT_LARGEST) {
        selected.push(representatives[i].clone());
    }

    let mut warnings = Vec::new();
    if selected.len() < total_slots {
        tracing::warn!(
            requested = total_slots,
            available = selected.len(),
            "Padding sentiment composition, fewer clusters than slots"
        );
        warnings.push(PipelineWarning::FewerClustersThanRequested {
            requested: total_slots,
            available: selected.len(),
        });

        // Pad with the least-confident selection rather than crashing or
        // silently truncating; the warning tells callers it happened.
        if let Some(filler) = selected
            .iter()
            .min_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
        {
            while selected.len() < total_slots {
                selected.push(filler.clone());
            }
        }
    }

    AssemblyOutcome {
        representatives: selected,
        warnings,
    }
}
