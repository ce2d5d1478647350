//! Configuration management for zeitgeist
//!
//! Handles loading, validation, and defaults for the pipeline configuration.
//! All tunables recognized by the pipeline live here; the CLI only overlays
//! a handful of them per invocation.

use crate::error::{Result, ZeitgeistError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub storage: StorageConfig,
    pub sampling: SamplingConfig,
    pub vectorize: VectorizeConfig,
    pub clustering: ClusteringConfig,
    pub mock: MockConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Where topic record files and the distance cache live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one CSV record file per topic
    pub data_dir: PathBuf,
    /// Directory for cached distance matrices
    pub cache_dir: PathBuf,
    /// Serve pairwise distance matrices from the on-disk cache
    #[serde(default)]
    pub use_distance_cache: bool,
}

/// Corpus sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of records drawn from the source per run
    pub sample_size: usize,
    /// Seed for the pseudo-random generator; omit for entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Text-to-vector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizeConfig {
    /// Drop common English stop words before counting terms
    pub stopword_filtering: bool,
    /// Run the spelling normalizer over tokens before counting
    pub spelling_correction: bool,
}

/// Cluster engine and ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Number of topical clusters to surface (FixedK and top-N ranking)
    pub num_clusters: usize,
    /// Number of clusters for the sentiment pass
    pub sentiment_clusters: usize,
    /// Merge threshold for the AutoK stopping rule, in (0, 1)
    pub distance_threshold: f64,
    /// Use the threshold-driven AutoK policy instead of FixedK
    #[serde(default)]
    pub auto_k: bool,
}

/// Mock-path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Skip clustering and synthesize plausible representatives
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ZeitgeistError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load the config file if one exists at the default path, otherwise
    /// fall back to defaults. An explicit path that does not exist is an
    /// error; the implicit default path is allowed to be absent.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Default config file location (~/.config/zeitgeist/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ZeitgeistError::Config("Cannot determine config directory".into()))?;
        Ok(base.join("zeitgeist").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Recognized:
    /// - ZEITGEIST_DATA_DIR: overrides storage.data_dir
    /// - ZEITGEIST_CACHE_DIR: overrides storage.cache_dir
    /// - ZEITGEIST_SEED: overrides sampling.seed
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("ZEITGEIST_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("ZEITGEIST_CACHE_DIR") {
            self.storage.cache_dir = PathBuf::from(dir);
        }
        if let Ok(seed) = std::env::var("ZEITGEIST_SEED") {
            if let Ok(seed) = seed.parse() {
                self.sampling.seed = Some(seed);
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zeitgeist");
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            storage: StorageConfig {
                data_dir: base.join("data"),
                cache_dir: base.join("cache"),
                use_distance_cache: false,
            },
            sampling: SamplingConfig {
                sample_size: 2048,
                seed: None,
            },
            vectorize: VectorizeConfig {
                stopword_filtering: true,
                spelling_correction: false,
            },
            clustering: ClusteringConfig {
                num_clusters: 3,
                sentiment_clusters: 8,
                distance_threshold: 0.975,
                auto_k: false,
            },
            mock: MockConfig { enabled: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn default_values_match_contract() {
        let config = Config::default();
        assert_eq!(config.sampling.sample_size, 2048);
        assert_eq!(config.clustering.num_clusters, 3);
        assert_eq!(config.clustering.sentiment_clusters, 8);
        assert!((config.clustering.distance_threshold - 0.975).abs() < 1e-12);
        assert!(config.vectorize.stopword_filtering);
        assert!(!config.vectorize.spelling_correction);
        assert!(!config.mock.enabled);
    }

    #[test]
    fn roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sampling.sample_size, config.sampling.sample_size);
        assert_eq!(
            parsed.clustering.distance_threshold,
            config.clustering.distance_threshold
        );
    }
}
