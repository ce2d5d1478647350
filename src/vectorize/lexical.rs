//! Lexical term-count vectorization
//!
//! Builds a vocabulary over all distinct tokens in the corpus and emits one
//! count row per text. Vocabulary columns are assigned in first-occurrence
//! order, so vector layout is stable for the duration of one invocation and
//! reproducible given the same corpus order.

use ahash::{HashMap, HashMapExt};
use ndarray::Array2;

/// Spelling normalization hook applied per token before counting.
///
/// The real corrector is an external collaborator; the pipeline only needs
/// this seam. The default implementation passes tokens through unchanged.
pub trait SpellingNormalizer {
    fn normalize(&self, token: &str) -> String;
}

/// No-op normalizer, used when spelling correction is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityNormalizer;

impl SpellingNormalizer for IdentityNormalizer {
    fn normalize(&self, token: &str) -> String {
        token.to_string()
    }
}

impl<T: SpellingNormalizer + ?Sized> SpellingNormalizer for &T {
    fn normalize(&self, token: &str) -> String {
        (**self).normalize(token)
    }
}

impl<T: SpellingNormalizer + ?Sized> SpellingNormalizer for Box<T> {
    fn normalize(&self, token: &str) -> String {
        (**self).normalize(token)
    }
}

/// Common English stop words dropped before counting when filtering is on.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Term-count vectorizer over a shared per-invocation vocabulary.
pub struct LexicalVectorizer<N: SpellingNormalizer = IdentityNormalizer> {
    stopword_filtering: bool,
    normalizer: Option<N>,
}

impl LexicalVectorizer<IdentityNormalizer> {
    pub fn new(stopword_filtering: bool) -> Self {
        Self {
            stopword_filtering,
            normalizer: None,
        }
    }
}

impl<N: SpellingNormalizer> LexicalVectorizer<N> {
    pub fn with_normalizer(stopword_filtering: bool, normalizer: N) -> Self {
        Self {
            stopword_filtering,
            normalizer: Some(normalizer),
        }
    }

    /// Tokenize one text: lowercase, split on whitespace, strip tokens down
    /// to word characters, then apply stop-word filtering and the optional
    /// spelling normalizer.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(|raw| {
                raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_string()
            })
            .filter(|token| !token.is_empty())
            .filter(|token| !self.stopword_filtering || !STOPWORDS.contains(&token.as_str()))
            .map(|token| match &self.normalizer {
                Some(normalizer) => normalizer.normalize(&token),
                None => token,
            })
            .collect()
    }

    /// Vectorize the corpus texts into an `n x vocab` count matrix.
    ///
    /// Texts that tokenize to nothing produce all-zero rows; a corpus whose
    /// every text does so yields a matrix with zero columns. Both are legal.
    pub fn vectorize(&self, texts: &[&str]) -> Array2<f64> {
        let token_rows: Vec<Vec<String>> = texts.iter().map(|t| self.tokenize(t)).collect();

        // First-occurrence column assignment.
        let mut vocab: HashMap<&str, usize> = HashMap::new();
        for row in &token_rows {
            for token in row {
                let next = vocab.len();
                vocab.entry(token.as_str()).or_insert(next);
            }
        }

        let mut matrix = Array2::<f64>::zeros((texts.len(), vocab.len()));
        for (i, row) in token_rows.iter().enumerate() {
            for token in row {
                let j = vocab[token.as_str()];
                matrix[[i, j]] += 1.0;
            }
        }
        matrix
    }
}
