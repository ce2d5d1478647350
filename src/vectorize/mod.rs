//! Text-to-vector conversion
//!
//! Two feature families share this module: lexical term-count vectors over
//! a per-invocation vocabulary, and 3-dimensional affective intensity
//! vectors from a sentiment-lexicon scorer. Both emit rows of one
//! `ndarray::Array2<f64>` so the cluster engine is agnostic to the mode.

mod affective;
mod lexical;

pub use affective::{vectorize, AffectiveVectors, LexiconScorer, PolarityScorer, PolarityScores};
pub use lexical::{IdentityNormalizer, LexicalVectorizer, SpellingNormalizer};

/// Feature space tag, used for cache keying and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorizeMode {
    /// Vocabulary-indexed term counts
    Lexical,
    /// Sentiment-intensity scores (positive, negative, neutral)
    Affective,
}

impl VectorizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Affective => "affective",
        }
    }
}
