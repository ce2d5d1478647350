//! Affective (sentiment-intensity) vectorization
//!
//! Each text becomes a 3-dimensional vector of positive, negative, and
//! neutral mass, each component in [0, 1], plus a compound polarity score
//! in [-1, 1] carried separately for ranking. The scorer itself sits
//! behind the `PolarityScorer` trait so a richer lexicon can be swapped in;
//! the built-in `LexiconScorer` is a compact valence-lexicon implementation
//! with negation and booster handling.

use ndarray::Array2;

/// Polarity scores for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityScores {
    /// Positive sentiment mass in [0, 1]
    pub pos: f64,
    /// Negative sentiment mass in [0, 1]
    pub neg: f64,
    /// Neutral mass in [0, 1]
    pub neu: f64,
    /// Overall polarity in [-1, 1]
    pub compound: f64,
}

impl PolarityScores {
    pub const NEUTRAL: PolarityScores = PolarityScores {
        pos: 0.0,
        neg: 0.0,
        neu: 1.0,
        compound: 0.0,
    };
}

/// Sentiment-lexicon scorer seam.
///
/// Implementations must be deterministic: the same text always yields the
/// same scores.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> PolarityScores;
}

/// Affective vectors for a corpus: the `n x 3` intensity matrix fed to the
/// cluster engine plus per-record compound scores used by the sentiment
/// ranking policy.
#[derive(Debug, Clone)]
pub struct AffectiveVectors {
    pub matrix: Array2<f64>,
    pub compounds: Vec<f64>,
}

/// Vectorize corpus texts with the given scorer.
pub fn vectorize<S: PolarityScorer + ?Sized>(scorer: &S, texts: &[&str]) -> AffectiveVectors {
    let mut matrix = Array2::<f64>::zeros((texts.len(), 3));
    let mut compounds = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        let scores = scorer.score(text);
        matrix[[i, 0]] = scores.pos;
        matrix[[i, 1]] = scores.neg;
        matrix[[i, 2]] = scores.neu;
        compounds.push(scores.compound);
    }
    AffectiveVectors { matrix, compounds }
}

/// Word valences in [-4, 4], a compact cut of a standard affect lexicon.
const LEXICON: &[(&str, f64)] = &[
    ("abandoned", -2.0),
    ("adore", 3.2),
    ("afraid", -2.2),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoying", -1.9),
    ("awesome", 3.1),
    ("awful", -2.7),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("betrayed", -2.6),
    ("bless", 2.2),
    ("boring", -1.6),
    ("brilliant", 2.8),
    ("broken", -1.9),
    ("celebrate", 2.7),
    ("crisis", -2.3),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("damn", -1.6),
    ("dead", -2.9),
    ("delight", 2.9),
    ("destroy", -2.6),
    ("disaster", -3.1),
    ("disgusting", -2.9),
    ("dishonest", -2.4),
    ("dumb", -2.2),
    ("enjoy", 2.3),
    ("evil", -3.3),
    ("excellent", 3.0),
    ("excited", 2.4),
    ("fail", -2.4),
    ("failure", -2.5),
    ("fake", -2.1),
    ("fantastic", 2.9),
    ("fear", -2.2),
    ("fraud", -2.8),
    ("free", 1.8),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.5),
    ("great", 2.8),
    ("happy", 2.7),
    ("hate", -3.2),
    ("hero", 2.6),
    ("hope", 1.9),
    ("horrible", -2.9),
    ("hurt", -2.2),
    ("idiot", -2.6),
    ("inspiring", 2.6),
    ("joy", 2.8),
    ("kill", -3.4),
    ("kind", 2.2),
    ("liar", -2.7),
    ("lie", -2.0),
    ("lose", -1.8),
    ("loser", -2.4),
    ("love", 3.2),
    ("lovely", 2.8),
    ("mad", -2.1),
    ("miserable", -2.7),
    ("nice", 1.8),
    ("pathetic", -2.5),
    ("peace", 2.5),
    ("perfect", 3.0),
    ("please", 1.2),
    ("proud", 2.4),
    ("sad", -2.1),
    ("scared", -2.2),
    ("shame", -2.1),
    ("sick", -2.0),
    ("smart", 2.1),
    ("stupid", -2.6),
    ("support", 1.9),
    ("terrible", -2.9),
    ("terrific", 2.8),
    ("thank", 2.0),
    ("thanks", 2.1),
    ("threat", -2.3),
    ("tragedy", -3.0),
    ("trust", 2.1),
    ("ugly", -2.4),
    ("unfair", -2.2),
    ("useless", -2.2),
    ("victory", 2.7),
    ("war", -2.9),
    ("welcome", 2.0),
    ("win", 2.6),
    ("winner", 2.8),
    ("wonderful", 3.0),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Words that flip the valence of the token that follows them.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "none", "cannot", "can't", "don't", "won't",
    "isn't", "aren't", "wasn't", "weren't", "didn't", "doesn't", "ain't",
];

/// Words that intensify the valence of the token that follows them.
const BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "absolutely", "totally", "incredibly", "so", "utterly",
];

/// Scaling applied to a valence that follows a negation.
const NEGATION_SCALE: f64 = -0.74;
/// Increment applied to a valence that follows a booster.
const BOOSTER_INCREMENT: f64 = 0.293;
/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;

/// Built-in valence-lexicon polarity scorer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    fn valence(token: &str) -> Option<f64> {
        LEXICON
            .binary_search_by(|(word, _)| word.cmp(&token))
            .ok()
            .map(|i| LEXICON[i].1)
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> PolarityScores {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(|raw| {
                raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_string()
            })
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return PolarityScores::NEUTRAL;
        }

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        let mut total_valence = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = Self::valence(token) else {
                // Negations and boosters modify their neighbor; they do not
                // count as neutral mass themselves.
                if !NEGATIONS.contains(&token.as_str()) && !BOOSTERS.contains(&token.as_str()) {
                    neu_count += 1.0;
                }
                continue;
            };

            if i > 0 {
                let prev = tokens[i - 1].as_str();
                if BOOSTERS.contains(&prev) {
                    valence += BOOSTER_INCREMENT * valence.signum();
                }
                if NEGATIONS.contains(&prev) {
                    valence *= NEGATION_SCALE;
                }
            }

            total_valence += valence;
            if valence > 0.0 {
                pos_sum += valence;
            } else {
                neg_sum += valence.abs();
            }
        }

        let mass = pos_sum + neg_sum + neu_count;
        if mass == 0.0 {
            return PolarityScores::NEUTRAL;
        }

        let compound = total_valence / (total_valence * total_valence + COMPOUND_ALPHA).sqrt();

        PolarityScores {
            pos: pos_sum / mass,
            neg: neg_sum / mass,
            neu: neu_count / mass,
            compound,
        }
    }
}
