//! Clustering-free mock representatives
//!
//! Substitutes for the full pipeline in controlled and test scenarios:
//! random records with synthetic cardinalities and confidences shaped like
//! real output, bit-for-bit reproducible under a fixed seed. Never run
//! without a seed; config validation enforces that.

use crate::clustering::{round_confidence, Representative};
use crate::corpus::Corpus;
use crate::error::{Result, ZeitgeistError};
use rand::seq::index::sample as index_sample;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Which output shape to mimic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Sorted by cardinality descending.
    Topical,
    /// First three slots ordered most-positive, most-negative,
    /// most-neutral by a synthetic compound score.
    Sentiment,
}

/// Proportional cardinality ranges per output slot, as fractions of the
/// corpus size. Later slots reuse the last range.
const SHARE_RANGES: &[(f64, f64)] = &[
    (0.25, 0.50),
    (0.15, 0.30),
    (0.08, 0.20),
    (0.05, 0.15),
    (0.03, 0.10),
    (0.02, 0.08),
];

/// Synthesize `count` plausible representatives without clustering.
///
/// Records are drawn uniformly without replacement; a corpus smaller than
/// `count` yields as many as it has. Confidences come from a triangular
/// distribution centered at 0.5.
pub fn mock_representatives(
    corpus: &Corpus,
    count: usize,
    mode: MockMode,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Representative>> {
    let n = corpus.len();
    if n == 0 {
        return Err(ZeitgeistError::EmptyInput { stage: "mock" });
    }

    let count = count.min(n);
    let picks: Vec<usize> = index_sample(rng, n, count).into_iter().collect();

    let mut drafts: Vec<(Representative, f64)> = Vec::with_capacity(count);
    for (slot, &pos) in picks.iter().enumerate() {
        let (lo, hi) = SHARE_RANGES[slot.min(SHARE_RANGES.len() - 1)];
        let share = rng.gen_range(lo..hi);
        let cardinality = ((share * n as f64).round() as usize).max(1);

        // Sum of two uniforms: triangular on [0, 1] peaking at 0.5.
        let confidence = round_confidence((rng.gen::<f64>() + rng.gen::<f64>()) / 2.0);
        let compound = rng.gen_range(-1.0..1.0);

        let record = corpus
            .get(pos)
            .ok_or(ZeitgeistError::EmptyInput { stage: "mock" })?
            .clone();
        drafts.push((
            Representative {
                cardinality,
                confidence,
                record,
            },
            compound,
        ));
    }

    let representatives = match mode {
        MockMode::Topical => {
            let mut drafts = drafts;
            drafts.sort_by(|a, b| b.0.cardinality.cmp(&a.0.cardinality));
            drafts.into_iter().map(|(rep, _)| rep).collect()
        }
        MockMode::Sentiment => order_sentiment(drafts),
    };

    Ok(representatives)
}

/// Arrange drafts to honor the sentiment output contract: the synthetic
/// most-positive, most-negative, and closest-to-neutral first, then the
/// rest by cardinality descending.
fn order_sentiment(mut drafts: Vec<(Representative, f64)>) -> Vec<Representative> {
    let mut ordered = Vec::with_capacity(drafts.len());

    // Slot order: most positive, most negative, most neutral.
    let keys: [fn(f64) -> f64; 3] = [|c| -c, |c| c, |c| c.abs()];
    for key in keys {
        if drafts.is_empty() {
            break;
        }
        let best = drafts
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                key(a.1)
                    .partial_cmp(&key(b.1))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .expect("drafts not empty");
        ordered.push(drafts.remove(best).0);
    }

    drafts.sort_by(|a, b| b.0.cardinality.cmp(&a.0.cardinality));
    ordered.extend(drafts.into_iter().map(|(rep, _)| rep));
    ordered
}
