//! CSV-backed topic record store
//!
//! One file per topic under the data directory, with the gatherer's header:
//! `index,text,timestamp,fav_count,ret_count,username,at_tag,id`. Numeric
//! fields default to 0 when absent; rows that fail to parse or carry no
//! text are skipped with a warning rather than failing the batch.

use crate::corpus::Record;
use crate::error::{Result, ZeitgeistError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw row as written by the gatherer. Everything except `index` is
/// optional so that one malformed row cannot poison the whole file.
#[derive(Debug, Deserialize)]
struct RawRow {
    index: usize,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    fav_count: Option<u64>,
    #[serde(default)]
    ret_count: Option<u64>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    at_tag: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

/// Result of loading a topic file: usable records plus the count of rows
/// dropped as malformed (unparseable or missing the text field).
#[derive(Debug)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Topic record store rooted at a data directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the record file for a topic
    pub fn topic_path(&self, topic: &str) -> PathBuf {
        self.data_dir.join(format!("{topic}.csv"))
    }

    /// Load all records for a topic, skipping rows without text.
    pub fn load(&self, topic: &str) -> Result<LoadedRecords> {
        let path = self.topic_path(topic);
        if !path.exists() {
            return Err(ZeitgeistError::TopicNotFound {
                topic: topic.to_string(),
                path,
            });
        }

        Self::load_path(&path)
    }

    /// Load records from an explicit file path
    pub fn load_path(path: &Path) -> Result<LoadedRecords> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(ZeitgeistError::Csv)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in reader.deserialize::<RawRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(ZeitgeistError::Csv(e)),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "Skipping row that fails to parse");
                    continue;
                }
            };
            match row.text {
                Some(text) if !text.trim().is_empty() => {
                    records.push(Record {
                        index: row.index,
                        text,
                        timestamp: row.timestamp,
                        fav_count: row.fav_count.unwrap_or(0),
                        ret_count: row.ret_count.unwrap_or(0),
                        username: row.username,
                        at_tag: row.at_tag,
                        id: row.id,
                    });
                }
                _ => {
                    skipped += 1;
                    tracing::warn!(index = row.index, "Skipping record with no text field");
                }
            }
        }

        Ok(LoadedRecords { records, skipped })
    }

    /// Topics that have a record file in the data directory
    pub fn topics(&self) -> Result<Vec<String>> {
        let mut topics = Vec::new();
        let entries = std::fs::read_dir(&self.data_dir).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to read data directory: {}", self.data_dir.display()),
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| ZeitgeistError::Io {
                source: e,
                context: "Failed to read data directory entry".to_string(),
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    topics.push(stem.to_string());
                }
            }
        }
        topics.sort();
        Ok(topics)
    }
}
