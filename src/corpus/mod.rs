//! Records, the topic record store, text cleansing, and corpus sampling
//!
//! A `Record` is one social-media post plus the opaque metadata gathered
//! with it. A `Corpus` is the fixed, ordered sample of records that one
//! pipeline invocation operates on; it is drawn once and never mutated.

mod cleanse;
mod sampler;
mod store;

pub use cleanse::{cleanse, display_text};
pub use sampler::Sampler;
pub use store::{CsvStore, LoadedRecords};

use serde::{Deserialize, Serialize};

/// One text record plus opaque metadata, carried through unmodified.
///
/// `index` is the record's stable position in the source file, not its
/// position in the sampled corpus; it survives sampling so output can be
/// traced back to the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub fav_count: u64,
    #[serde(default)]
    pub ret_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// An ordered, fixed-size sequence of records drawn once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at a corpus position (not a source index).
    pub fn get(&self, pos: usize) -> Option<&Record> {
        self.records.get(pos)
    }

    /// Texts of all records, in corpus order.
    pub fn texts(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.text.as_str()).collect()
    }
}
