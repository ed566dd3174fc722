//! Oracle score cache
//!
//! Scores are keyed by the SHA-256 of the candidate label set and the text,
//! so re-running a batch skips texts the oracle has already scored.

use super::oracle::{ClassificationOracle, LabelScores};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const CACHE_FILE_NAME: &str = ".oracle-cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub oracle: String,
    pub scores: LabelScores,
    pub cached_at: DateTime<Utc>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// Load the cache; a missing, corrupt or outdated file gives an empty cache
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("cannot open oracle cache {}: {}", cache_path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_reader::<_, CacheFile>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                tracing::info!("oracle cache version mismatch, starting fresh");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("oracle cache is corrupt, starting fresh: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, oracle: &str, scores: LabelScores) {
        self.entries.insert(
            key,
            CacheEntry {
                oracle: oracle.to_string(),
                scores,
                cached_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest and newest entry timestamps
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let oldest = self.entries.values().map(|e| e.cached_at).min()?;
        let newest = self.entries.values().map(|e| e.cached_at).max()?;
        Some((oldest, newest))
    }

    /// Delete the cache file; true when one existed
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// Cache key for a (labels, text) pair
pub fn cache_key(oracle: &str, labels: &[String], text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(oracle.as_bytes());
    hasher.update([0x1e]);
    for label in labels {
        hasher.update(label.as_bytes());
        hasher.update([0x1f]);
    }
    hasher.update([0x1e]);
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Wraps an oracle with the on-disk score cache
///
/// Errors are never cached. Call [`CachingOracle::persist`] after the batch.
pub struct CachingOracle<O> {
    inner: O,
    folder: PathBuf,
    cache: Mutex<CacheFile>,
    hits: Mutex<usize>,
}

impl<O: ClassificationOracle> CachingOracle<O> {
    pub fn new(inner: O, folder: &Path) -> Self {
        let cache = CacheFile::load(folder);
        tracing::debug!(entries = cache.len(), "loaded oracle cache");
        Self {
            inner,
            folder: folder.to_path_buf(),
            cache: Mutex::new(cache),
            hits: Mutex::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.lock().map(|h| *h).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn persist(&self) -> Result<()> {
        let snapshot = match self.cache.lock() {
            Ok(cache) => cache.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        snapshot.save(&self.folder)
    }
}

#[async_trait]
impl<O: ClassificationOracle> ClassificationOracle for CachingOracle<O> {
    async fn classify(&self, text: &str, labels: &[String]) -> Result<LabelScores> {
        let key = cache_key(self.inner.name(), labels, text);

        let cached = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(&key).map(|e| e.scores.clone()));
        if let Some(scores) = cached {
            if let Ok(mut hits) = self.hits.lock() {
                *hits += 1;
            }
            return Ok(scores);
        }

        tracing::debug!("oracle cache miss");
        let scores = self.inner.classify(text, labels).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, self.inner.name(), scores.clone());
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cache_file_roundtrip() {
        let dir = tempdir().unwrap();
        let mut cache = CacheFile::default();
        cache.insert("k".into(), "keyword", vec![("A".into(), 0.5)]);
        cache.save(dir.path()).unwrap();

        let loaded = CacheFile::load(dir.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("k").unwrap().scores, vec![("A".to_string(), 0.5)]);
        assert!(loaded.time_span().is_some());
    }

    #[test]
    fn test_corrupt_cache_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(CacheFile::path(dir.path()), "{not json").unwrap();
        assert!(CacheFile::load(dir.path()).is_empty());
    }

    #[test]
    fn test_version_mismatch_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(CacheFile::path(dir.path()), r#"{"version": 99, "entries": {}}"#).unwrap();
        assert!(CacheFile::load(dir.path()).is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        assert!(!CacheFile::clear(dir.path()).unwrap());
        CacheFile::default().save(dir.path()).unwrap();
        assert!(CacheFile::clear(dir.path()).unwrap());
        assert!(!CacheFile::path(dir.path()).exists());
    }

    #[test]
    fn test_cache_key_depends_on_labels_and_text() {
        let labels = vec!["A".to_string(), "B".to_string()];
        let key = cache_key("http", &labels, "text");
        assert_eq!(key.len(), 64);
        assert_eq!(key, cache_key("http", &labels, "text"));
        assert_ne!(key, cache_key("http", &labels, "other"));
        assert_ne!(key, cache_key("http", &labels[..1], "text"));
        assert_ne!(key, cache_key("keyword", &labels, "text"));
    }
}
