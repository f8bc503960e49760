//! Cache storage implementation

use crate::error::{NbCacheError, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Content-addressed store of cell output records
///
/// Each entry is one JSON file in the cache directory. Files are nested
/// one level deep to avoid too many children in the top-level directory;
/// an entry for key `abcdef1234` lives at:
///
/// `root/ab/cdef1234.json`
pub struct OutputCache {
    /// Root directory of the store
    root: PathBuf,
}

impl OutputCache {
    /// Open a store rooted at the given directory.
    ///
    /// The directory itself is created lazily on the first `put`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path for a key: two-character shard prefix, then the
    /// remainder as the file stem. Keys are hex digests, so splitting
    /// at 2 is always in bounds and bounds the top-level fanout to 256.
    fn entry_path(&self, key: &str) -> PathBuf {
        let (prefix, suffix) = key.split_at(2);
        self.root.join(prefix).join(format!("{}.json", suffix))
    }

    /// Whether an entry exists for the given key
    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    /// Load the output records stored under a key.
    ///
    /// Fails with `KeyNotFound` when absent. If the file exists but
    /// cannot be parsed as JSON, it is removed before `CorruptEntry`
    /// is returned, so the caller can treat corruption as a miss and
    /// recompute.
    pub fn get(&self, key: &str) -> Result<Vec<Value>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Err(NbCacheError::KeyNotFound {
                key: key.to_string(),
            });
        }

        let file = File::open(&path).map_err(|e| {
            NbCacheError::Cache(format!(
                "Failed to open cache entry '{}': {}",
                path.display(),
                e
            ))
        })?;
        let reader = BufReader::new(file);

        match serde_json::from_reader(reader) {
            Ok(outputs) => Ok(outputs),
            Err(_) => {
                // Self-heal: drop the unreadable entry so the next run
                // recomputes it instead of failing again.
                fs::remove_file(&path).map_err(|e| {
                    NbCacheError::Cache(format!(
                        "Failed to remove corrupt cache entry '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Err(NbCacheError::CorruptEntry {
                    key: key.to_string(),
                })
            }
        }
    }

    /// Store output records under a key, creating the shard directory
    /// as needed.
    ///
    /// Overwrites any existing entry. Concurrent runs sharing the store
    /// may race on directory creation; `create_dir_all` absorbs the
    /// "already exists" case.
    pub fn put(&self, key: &str, outputs: &[Value]) -> Result<()> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NbCacheError::Cache(format!(
                    "Failed to create cache directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = File::create(&path).map_err(|e| {
            NbCacheError::Cache(format!(
                "Failed to create cache entry '{}': {}",
                path.display(),
                e
            ))
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, outputs)?;

        Ok(())
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_outputs() -> Vec<Value> {
        vec![json!({
            "output_type": "stream",
            "name": "stdout",
            "text": "hello\n"
        })]
    }

    #[test]
    fn test_entry_path_sharding() {
        let cache = OutputCache::new("/cache");
        let path = cache.entry_path("ab1234");
        assert_eq!(path, PathBuf::from("/cache/ab/1234.json"));
    }

    #[test]
    fn test_get_missing_key() {
        let temp = TempDir::new().unwrap();
        let cache = OutputCache::new(temp.path());

        assert!(!cache.contains("ab1234"));
        let err = cache.get("ab1234").unwrap_err();
        assert!(matches!(err, NbCacheError::KeyNotFound { key } if key == "ab1234"));
    }

    #[test]
    fn test_put_then_get() {
        let temp = TempDir::new().unwrap();
        let cache = OutputCache::new(temp.path().join("store"));
        let outputs = sample_outputs();

        cache.put("ab1234", &outputs).unwrap();

        assert!(cache.contains("ab1234"));
        assert_eq!(cache.get("ab1234").unwrap(), outputs);
    }

    #[test]
    fn test_put_overwrites() {
        let temp = TempDir::new().unwrap();
        let cache = OutputCache::new(temp.path());

        cache.put("ab1234", &sample_outputs()).unwrap();
        let replacement = vec![json!({
            "output_type": "stream",
            "name": "stdout",
            "text": "replaced\n"
        })];
        cache.put("ab1234", &replacement).unwrap();

        assert_eq!(cache.get("ab1234").unwrap(), replacement);
    }

    #[test]
    fn test_corrupt_entry_self_heals() {
        let temp = TempDir::new().unwrap();
        let cache = OutputCache::new(temp.path());

        // Write garbage where the entry would live
        let path = temp.path().join("ab").join("1234.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = File::create(&path).unwrap();
        write!(f, "{{not json").unwrap();
        drop(f);

        let err = cache.get("ab1234").unwrap_err();
        assert!(err.is_cache_miss());
        assert!(matches!(err, NbCacheError::CorruptEntry { key } if key == "ab1234"));
        // File was removed; the key now reads as absent
        assert!(!path.exists());
        assert!(!cache.contains("ab1234"));
    }

    #[test]
    fn test_empty_outputs_roundtrip() {
        let temp = TempDir::new().unwrap();
        let cache = OutputCache::new(temp.path());

        cache.put("cd5678", &[]).unwrap();
        assert_eq!(cache.get("cd5678").unwrap(), Vec::<Value>::new());
    }
}
