//! Pipeline orchestration
//!
//! Ties sampling, vectorization, clustering, selection, and ranking into
//! the two passes one report needs. A `Pipeline` is built per invocation
//! and owns its sampler, so the lexical and sentiment passes see the
//! identical corpus; nothing is shared across invocations. The distance
//! cache and the polarity scorer are injected collaborators.

use crate::assemble;
use crate::clustering::{
    group_clusters, pairwise_distances, select_representatives, CacheKey, ClusterEngine,
    ClusterPolicy, DiskCache, DistanceCache, NoopCache, Representative,
};
use crate::config::Config;
use crate::corpus::{cleanse, display_text, Corpus, CsvStore, Sampler};
use crate::error::{PipelineWarning, Result};
use crate::mock::{mock_representatives, MockMode};
use crate::vectorize::{
    self, IdentityNormalizer, LexicalVectorizer, LexiconScorer, PolarityScorer,
    SpellingNormalizer, VectorizeMode,
};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Result of one pass: the ordered representatives and every non-fatal
/// degradation hit along the way.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub representatives: Vec<Representative>,
    pub warnings: Vec<PipelineWarning>,
}

/// One invocation of the representative-extraction pipeline.
pub struct Pipeline {
    config: Config,
    store: CsvStore,
    sampler: Sampler,
    engine: ClusterEngine,
    cache: Box<dyn DistanceCache>,
    scorer: Box<dyn PolarityScorer>,
    speller: Box<dyn SpellingNormalizer>,
}

impl Pipeline {
    /// Build a pipeline from configuration, wiring the on-disk distance
    /// cache when enabled.
    pub fn new(config: Config) -> Result<Self> {
        let store = CsvStore::new(config.storage.data_dir.clone());
        let sampler = Sampler::new(config.sampling.sample_size, config.sampling.seed);
        let cache: Box<dyn DistanceCache> = if config.storage.use_distance_cache {
            Box::new(DiskCache::new(config.storage.cache_dir.clone())?)
        } else {
            Box::new(NoopCache)
        };

        Ok(Self {
            config,
            store,
            sampler,
            engine: ClusterEngine::new(),
            cache,
            scorer: Box::new(LexiconScorer::new()),
            speller: Box::new(IdentityNormalizer),
        })
    }

    /// Substitute the distance cache (tests inject an in-memory no-op).
    pub fn with_cache(mut self, cache: Box<dyn DistanceCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Substitute the sentiment-lexicon scorer.
    pub fn with_scorer(mut self, scorer: Box<dyn PolarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Substitute the spelling normalizer used when spelling correction is
    /// enabled in the configuration.
    pub fn with_speller(mut self, speller: Box<dyn SpellingNormalizer>) -> Self {
        self.speller = speller;
        self
    }

    /// Topical pass: lexical vectors, clustering, top-N by cardinality.
    pub fn run_topical(&mut self, topic: &str) -> Result<PassOutcome> {
        tracing::info!(topic, "Clustering word usage");
        let start = Instant::now();

        let corpus = self.sampler.sample(&self.store, topic)?.clone();
        let mut warnings = self.sampler.warnings().to_vec();

        if self.config.mock.enabled {
            let mut rng = self.mock_rng(0x1e);
            let representatives = mock_representatives(
                &corpus,
                self.config.clustering.num_clusters,
                MockMode::Topical,
                &mut rng,
            )?;
            return Ok(PassOutcome {
                representatives: finalize(representatives),
                warnings,
            });
        }

        let texts = corpus.texts();
        let cleansed: Vec<String> = texts.iter().map(|t| cleanse(t)).collect();
        let cleansed_refs: Vec<&str> = cleansed.iter().map(String::as_str).collect();
        let chars_removed: usize = texts
            .iter()
            .zip(&cleansed)
            .map(|(raw, clean)| raw.len().saturating_sub(clean.len()))
            .sum();
        tracing::debug!(records = corpus.len(), chars_removed, "Cleansed and vectorizing words");

        let identity = IdentityNormalizer;
        let normalizer: &dyn SpellingNormalizer = if self.config.vectorize.spelling_correction {
            &*self.speller
        } else {
            &identity
        };
        let vectorizer = LexicalVectorizer::with_normalizer(
            self.config.vectorize.stopword_filtering,
            normalizer,
        );
        let features = vectorizer.vectorize(&cleansed_refs);

        let policy = if self.config.clustering.auto_k {
            ClusterPolicy::AutoK(self.config.clustering.distance_threshold)
        } else {
            ClusterPolicy::FixedK(self.config.clustering.num_clusters)
        };

        let distances = self.distances(&cleansed_refs, &features, VectorizeMode::Lexical)?;
        let labels = self.engine.cluster(&distances, policy)?;
        let clusters = group_clusters(&labels, &features);
        tracing::debug!(clusters = clusters.len(), "Finding cluster centers");
        let representatives = select_representatives(&clusters, &features, &corpus)?;

        let outcome = assemble::assemble_topical(
            &clusters,
            &representatives,
            self.config.clustering.num_clusters,
        );
        warnings.extend(outcome.warnings);

        tracing::info!(
            clusters = clusters.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Topical pass done"
        );
        Ok(PassOutcome {
            representatives: finalize(outcome.representatives),
            warnings,
        })
    }

    /// Sentiment pass: affective vectors, clustering, six-slot composition.
    pub fn run_sentiment(&mut self, topic: &str) -> Result<PassOutcome> {
        tracing::info!(topic, "Clustering sentiment");
        let start = Instant::now();

        let corpus = self.sampler.sample(&self.store, topic)?.clone();
        let mut warnings = self.sampler.warnings().to_vec();

        if self.config.mock.enabled {
            let mut rng = self.mock_rng(0x5e);
            let representatives = mock_representatives(&corpus, 6, MockMode::Sentiment, &mut rng)?;
            return Ok(PassOutcome {
                representatives: finalize(representatives),
                warnings,
            });
        }

        tracing::debug!(records = corpus.len(), "Scoring polarity");
        let texts = corpus.texts();
        let vectors = vectorize::vectorize(&*self.scorer, &texts);

        let distances = self.distances(&texts, &vectors.matrix, VectorizeMode::Affective)?;
        let policy = ClusterPolicy::FixedK(self.config.clustering.sentiment_clusters);
        let labels = self.engine.cluster(&distances, policy)?;
        let clusters = group_clusters(&labels, &vectors.matrix);
        tracing::debug!(clusters = clusters.len(), "Finding cluster centers");
        let representatives = select_representatives(&clusters, &vectors.matrix, &corpus)?;

        let mean_compounds: Vec<f64> = clusters
            .iter()
            .map(|cluster| {
                let sum: f64 = cluster.members.iter().map(|&p| vectors.compounds[p]).sum();
                sum / cluster.size() as f64
            })
            .collect();

        let outcome = assemble::assemble_sentiment(&clusters, &representatives, &mean_compounds);
        warnings.extend(outcome.warnings);

        tracing::info!(
            clusters = clusters.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Sentiment pass done"
        );
        Ok(PassOutcome {
            representatives: finalize(outcome.representatives),
            warnings,
        })
    }

    /// The corpus this invocation operates on, if already drawn.
    pub fn corpus(&self) -> Option<&Corpus> {
        self.sampler.corpus()
    }

    /// Pairwise distances, served from the cache when a matching entry for
    /// this corpus content and mode exists.
    fn distances(
        &self,
        texts: &[&str],
        features: &Array2<f64>,
        mode: VectorizeMode,
    ) -> Result<Array2<f64>> {
        let key = CacheKey::for_corpus(texts, mode.as_str());
        if let Some(hit) = self.cache.get(&key)? {
            if hit.nrows() == features.nrows() {
                return Ok(hit);
            }
            tracing::warn!(
                key = key.as_str(),
                "Ignoring cache entry with mismatched size"
            );
        }
        let distances = pairwise_distances(features);
        self.cache.put(&key, &distances)?;
        Ok(distances)
    }

    /// Per-pass mock RNG, derived from the run seed and a pass tag so both
    /// passes are reproducible independent of invocation order.
    fn mock_rng(&self, tag: u64) -> ChaCha8Rng {
        match self.config.sampling.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed ^ tag),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Swap raw record text for its display form (URLs collapsed to a marker)
/// on the way out of the pipeline.
fn finalize(mut representatives: Vec<Representative>) -> Vec<Representative> {
    for rep in &mut representatives {
        rep.record.text = display_text(&rep.record.text);
        tracing::debug!(
            index = rep.record.index,
            cardinality = rep.cardinality,
            confidence = rep.confidence,
            "Selected representative"
        );
    }
    representatives
}
