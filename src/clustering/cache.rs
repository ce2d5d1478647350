//! Content-addressed distance-matrix cache
//!
//! Recomputing the O(n^2) pairwise matrix dominates repeated runs over the
//! same data, so the pipeline can serve it from a cache keyed by a BLAKE3
//! hash of the corpus texts and the feature-space tag. The cache is an
//! injectable collaborator: tests use `NoopCache`, the CLI wires up
//! `DiskCache`. Entries are append-only and never invalidated; staleness
//! after source-data changes without a key change is a documented caller
//! risk.

use crate::error::{Result, ZeitgeistError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Cache key derived from corpus content and feature mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hash the corpus texts (in corpus order) and the mode tag.
    pub fn for_corpus(texts: &[&str], mode: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(mode.as_bytes());
        for text in texts {
            // Length prefix keeps ["ab","c"] distinct from ["a","bc"].
            hasher.update(&(text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Injectable distance-matrix cache seam.
pub trait DistanceCache {
    /// Fetch a cached matrix, `None` on miss.
    fn get(&self, key: &CacheKey) -> Result<Option<Array2<f64>>>;
    /// Store a matrix under the key. Existing entries are left untouched.
    fn put(&self, key: &CacheKey, matrix: &Array2<f64>) -> Result<()>;
}

/// Cache that never hits; the default for tests and one-shot runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl DistanceCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Result<Option<Array2<f64>>> {
        Ok(None)
    }

    fn put(&self, _key: &CacheKey, _matrix: &Array2<f64>) -> Result<()> {
        Ok(())
    }
}

/// Serialized form of a distance matrix (always square).
#[derive(Serialize, Deserialize)]
struct MatrixEntry {
    n: usize,
    data: Vec<f64>,
}

/// On-disk cache of zstd-compressed JSON entries under a cache directory.
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to create cache directory: {}", cache_dir.display()),
        })?;
        Ok(Self { cache_dir })
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json.zst", key.as_str()))
    }
}

impl DistanceCache for DiskCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Array2<f64>>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let compressed = fs::read(&path).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to read cache entry: {}", path.display()),
        })?;
        let raw = zstd::decode_all(compressed.as_slice()).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to decompress cache entry: {}", path.display()),
        })?;
        let entry: MatrixEntry =
            serde_json::from_slice(&raw).map_err(|e| ZeitgeistError::Json {
                source: e,
                context: format!("Failed to parse cache entry: {}", path.display()),
            })?;

        if entry.data.len() != entry.n * entry.n {
            return Err(ZeitgeistError::Cache(format!(
                "Corrupt cache entry {}: {} values for n={}",
                key.as_str(),
                entry.data.len(),
                entry.n
            )));
        }

        let matrix = Array2::from_shape_vec((entry.n, entry.n), entry.data)
            .map_err(|e| ZeitgeistError::Cache(format!("Corrupt cache entry shape: {e}")))?;
        tracing::debug!(key = key.as_str(), n = entry.n, "Distance cache hit");
        Ok(Some(matrix))
    }

    fn put(&self, key: &CacheKey, matrix: &Array2<f64>) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            // Append-only: a same-key entry holds the same content.
            return Ok(());
        }

        let entry = MatrixEntry {
            n: matrix.nrows(),
            data: matrix.iter().copied().collect(),
        };
        let raw = serde_json::to_vec(&entry).map_err(|e| ZeitgeistError::Json {
            source: e,
            context: "Failed to serialize cache entry".to_string(),
        })?;
        let compressed = zstd::encode_all(raw.as_slice(), 3).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: "Failed to compress cache entry".to_string(),
        })?;

        // Write to a temp file, then rename into place so readers never see
        // a partial entry.
        let temp_path = self.cache_dir.join(format!("{}.tmp", key.as_str()));
        let mut file = fs::File::create(&temp_path).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to create temp cache file: {}", temp_path.display()),
        })?;
        file.write_all(&compressed).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to write cache entry: {}", temp_path.display()),
        })?;
        file.sync_all().map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to sync cache entry: {}", temp_path.display()),
        })?;
        drop(file);

        fs::rename(&temp_path, &path).map_err(|e| ZeitgeistError::Io {
            source: e,
            context: format!("Failed to finalize cache entry: {}", path.display()),
        })?;
        tracing::debug!(key = key.as_str(), "Distance cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn key_depends_on_content_and_mode() {
        let texts = vec!["one", "two"];
        let a = CacheKey::for_corpus(&texts, "lexical");
        let b = CacheKey::for_corpus(&texts, "lexical");
        let c = CacheKey::for_corpus(&texts, "affective");
        let d = CacheKey::for_corpus(&["one", "three"], "lexical");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn key_respects_text_boundaries() {
        let a = CacheKey::for_corpus(&["ab", "c"], "lexical");
        let b = CacheKey::for_corpus(&["a", "bc"], "lexical");
        assert_ne!(a, b);
    }

    #[test]
    fn disk_cache_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let key = CacheKey::for_corpus(&["x", "y"], "lexical");
        let matrix = array![[0.0, 0.4], [0.4, 0.0]];

        assert!(cache.get(&key).unwrap().is_none());
        cache.put(&key, &matrix).unwrap();
        let fetched = cache.get(&key).unwrap().unwrap();
        assert_eq!(fetched, matrix);
    }

    #[test]
    fn disk_cache_is_append_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::new(dir.path()).unwrap();
        let key = CacheKey::for_corpus(&["x"], "lexical");
        let first = array![[0.0]];

        cache.put(&key, &first).unwrap();
        // A second put under the same key must not overwrite.
        cache.put(&key, &array![[9.0]]).unwrap();
        assert_eq!(cache.get(&key).unwrap().unwrap(), first);
    }
}
