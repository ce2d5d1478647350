use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the zeitgeist pipeline
#[derive(Error, Debug)]
pub enum ZeitgeistError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Record store file not found for the requested topic
    #[error("No record file for topic '{topic}' at {path}")]
    TopicNotFound { topic: String, path: PathBuf },

    /// A pipeline stage received zero usable records
    #[error("Empty input at stage '{stage}': nothing to process")]
    EmptyInput { stage: &'static str },

    /// The source had no records to sample from
    #[error("Insufficient data: requested {requested} records but source has {available}")]
    InsufficientData { requested: usize, available: usize },

    /// Distance-matrix cache errors
    #[error("Distance cache error: {0}")]
    Cache(String),

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// CSV record store errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Non-fatal conditions surfaced alongside pipeline output.
///
/// Recoverable degradations never abort a pass; they are collected on the
/// pass outcome and logged at `warn` so callers can decide how loudly to
/// report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// The source had fewer records than the requested sample size;
    /// the pass ran over all available records instead.
    SampleShortfall { requested: usize, available: usize },

    /// Clustering yielded fewer clusters than the assembly policy wanted;
    /// the result list is shorter (or padded, in sentiment mode).
    FewerClustersThanRequested { requested: usize, available: usize },

    /// Rows that failed to parse or carried no text were skipped while
    /// loading.
    MalformedRecords { skipped: usize },
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SampleShortfall {
                requested,
                available,
            } => write!(
                f,
                "sample shortfall: requested {requested} records, source has {available}"
            ),
            Self::FewerClustersThanRequested {
                requested,
                available,
            } => write!(
                f,
                "fewer clusters than requested: wanted {requested}, data yielded {available}"
            ),
            Self::MalformedRecords { skipped } => {
                write!(f, "skipped {skipped} malformed records")
            }
        }
    }
}

/// Result type for zeitgeist operations
pub type Result<T> = std::result::Result<T, ZeitgeistError>;
