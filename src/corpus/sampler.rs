//! Reproducible corpus sampling
//!
//! A `Sampler` is constructed per pipeline invocation and handed to every
//! stage that needs the sampled corpus, so the lexical and sentiment passes
//! of one run operate on the identical sample. The memo is scoped to the
//! sampler instance and keyed by topic; a request for a different topic
//! discards it and draws fresh. There is no process-wide cached sample.

use crate::corpus::{Corpus, CsvStore, Record};
use crate::error::{PipelineWarning, Result, ZeitgeistError};
use rand::seq::index::sample as index_sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A drawn sample together with the topic it was drawn for.
struct Drawn {
    topic: Option<String>,
    corpus: Corpus,
}

/// Draws one fixed-size uniform sample per topic and memoizes it.
pub struct Sampler {
    size: usize,
    rng: ChaCha8Rng,
    memo: Option<Drawn>,
    warnings: Vec<PipelineWarning>,
}

impl Sampler {
    /// Create a sampler for one pipeline invocation.
    ///
    /// A seed pins the generator for reproducible runs; `None` falls back
    /// to entropy, acceptable only outside mocked/controlled scenarios.
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            size,
            rng,
            memo: None,
            warnings: Vec::new(),
        }
    }

    /// Sample `size` records uniformly without replacement from the topic's
    /// record file. Repeated calls for the same topic return the memoized
    /// corpus unchanged; asking for a different topic discards the memo and
    /// draws a fresh sample for the new topic.
    ///
    /// An empty source is fatal. A source smaller than the sample size
    /// degrades to using every available record and records a
    /// `SampleShortfall` warning.
    pub fn sample(&mut self, store: &CsvStore, topic: &str) -> Result<&Corpus> {
        let stale = match &self.memo {
            Some(drawn) => drawn.topic.as_deref() != Some(topic),
            None => true,
        };
        if stale {
            let loaded = store.load(topic)?;
            self.warnings.clear();
            if loaded.skipped > 0 {
                self.warnings.push(PipelineWarning::MalformedRecords {
                    skipped: loaded.skipped,
                });
            }
            let corpus = self.draw(loaded.records)?;
            self.memo = Some(Drawn {
                topic: Some(topic.to_string()),
                corpus,
            });
        }
        Ok(&self.memo.as_ref().unwrap().corpus)
    }

    /// Sample from records already in memory (tests, preloaded sources).
    pub fn sample_records(&mut self, records: Vec<Record>) -> Result<&Corpus> {
        let stale = match &self.memo {
            Some(drawn) => drawn.topic.is_some(),
            None => true,
        };
        if stale {
            self.warnings.clear();
            let corpus = self.draw(records)?;
            self.memo = Some(Drawn {
                topic: None,
                corpus,
            });
        }
        Ok(&self.memo.as_ref().unwrap().corpus)
    }

    fn draw(&mut self, records: Vec<Record>) -> Result<Corpus> {
        let available = records.len();
        if available == 0 {
            return Err(ZeitgeistError::InsufficientData {
                requested: self.size,
                available: 0,
            });
        }

        if available <= self.size {
            if available < self.size {
                tracing::warn!(
                    requested = self.size,
                    available,
                    "Source smaller than sample size, using all records"
                );
                self.warnings.push(PipelineWarning::SampleShortfall {
                    requested: self.size,
                    available,
                });
            }
            return Ok(Corpus::new(records));
        }

        let chosen = index_sample(&mut self.rng, available, self.size);
        let mut picked: Vec<usize> = chosen.into_iter().collect();
        // Source order keeps the corpus stable regardless of draw order.
        picked.sort_unstable();

        let mut records = records;
        let mut sampled = Vec::with_capacity(self.size);
        // Drain from the back so earlier indices stay valid.
        for &idx in picked.iter().rev() {
            sampled.push(records.swap_remove(idx));
        }
        sampled.reverse();
        Ok(Corpus::new(sampled))
    }

    /// Warnings accumulated while drawing the sample.
    pub fn warnings(&self) -> &[PipelineWarning] {
        &self.warnings
    }

    /// The memoized corpus, if one has been drawn.
    pub fn corpus(&self) -> Option<&Corpus> {
        self.memo.as_ref().map(|drawn| &drawn.corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                index: i,
                text: format!("post number {i}"),
                timestamp: None,
                fav_count: 0,
                ret_count: 0,
                username: None,
                at_tag: None,
                id: None,
            })
            .collect()
    }

    #[test]
    fn same_seed_same_sample() {
        let mut a = Sampler::new(10, Some(7));
        let mut b = Sampler::new(10, Some(7));
        let sample_a = a.sample_records(records(100)).unwrap().clone();
        let sample_b = b.sample_records(records(100)).unwrap().clone();
        assert_eq!(sample_a, sample_b);
        assert_eq!(sample_a.len(), 10);
    }

    #[test]
    fn different_seed_different_sample() {
        let mut a = Sampler::new(10, Some(1));
        let mut b = Sampler::new(10, Some(2));
        let sample_a = a.sample_records(records(100)).unwrap().clone();
        let sample_b = b.sample_records(records(100)).unwrap().clone();
        assert_ne!(sample_a, sample_b);
    }

    #[test]
    fn sample_is_without_replacement() {
        let mut sampler = Sampler::new(50, Some(3));
        let corpus = sampler.sample_records(records(80)).unwrap();
        let mut indices: Vec<usize> = corpus.records().iter().map(|r| r.index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 50);
    }

    #[test]
    fn memoizes_across_calls() {
        let mut sampler = Sampler::new(5, Some(11));
        let first = sampler.sample_records(records(30)).unwrap().clone();
        // A second call must not redraw, even with different input.
        let second = sampler.sample_records(records(2)).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn different_topic_discards_the_memo() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let header = "index,text,timestamp,fav_count,ret_count,username,at_tag,id\n";
        for (topic, word) in [("apples", "apple"), ("trains", "train")] {
            let mut file =
                std::fs::File::create(dir.path().join(format!("{topic}.csv"))).unwrap();
            file.write_all(header.as_bytes()).unwrap();
            for i in 0..6 {
                writeln!(file, "{i},{word} post number {i},,,,,,").unwrap();
            }
        }

        let store = CsvStore::new(dir.path());
        let mut sampler = Sampler::new(4, Some(9));

        let apples = sampler.sample(&store, "apples").unwrap().clone();
        assert!(apples.texts().iter().all(|t| t.contains("apple")));

        let trains = sampler.sample(&store, "trains").unwrap().clone();
        assert!(trains.texts().iter().all(|t| t.contains("train")));

        // The same topic keeps returning the memoized draw.
        assert_eq!(sampler.sample(&store, "trains").unwrap(), &trains);
    }

    #[test]
    fn shortfall_degrades_with_warning() {
        let mut sampler = Sampler::new(100, Some(5));
        let corpus = sampler.sample_records(records(8)).unwrap();
        assert_eq!(corpus.len(), 8);
        assert_eq!(
            sampler.warnings(),
            &[PipelineWarning::SampleShortfall {
                requested: 100,
                available: 8
            }]
        );
    }

    #[test]
    fn empty_source_is_fatal() {
        let mut sampler = Sampler::new(10, Some(5));
        assert!(matches!(
            sampler.sample_records(Vec::new()),
            Err(ZeitgeistError::InsufficientData {
                available: 0,
                ..
            })
        ));
    }
}
