//! Zeitgeist - Representative-record extraction for social-media corpora
//!
//! Samples a reproducible corpus of short text records for a topic, then
//! runs it through vectorization, complete-linkage agglomerative clustering
//! over cosine distance, nearest-to-centroid representative selection, and
//! ranking assembly. The same pipeline runs twice per report: once over
//! lexical term counts to find topical factions and once over
//! sentiment-polarity vectors to find emotional factions.

pub mod assemble;
pub mod cli;
pub mod clustering;
pub mod config;
pub mod corpus;
pub mod error;
pub mod mock;
pub mod pipeline;
pub mod vectorize;

pub use error::{PipelineWarning, Result, ZeitgeistError};
