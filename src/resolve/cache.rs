//! Persistent address-to-country cache.
//!
//! A flat JSON object mapping each address to its country label, or to
//! `null` for addresses no backend could answer. Cached nulls matter: they
//! keep known-unresolvable addresses from being re-queried on every run.
//! Entries never expire; stale answers are trusted indefinitely.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error_handling::CacheError;

/// In-memory view of the cache file, reloaded at start and rewritten at the
/// end of each run.
#[derive(Debug)]
pub struct CountryCache {
    path: PathBuf,
    entries: HashMap<String, Option<String>>,
}

impl CountryCache {
    /// Loads the cache from `path`.
    ///
    /// A missing file is a normal first run; a corrupt file is discarded
    /// with a warning. Either way the pipeline starts from an empty map
    /// rather than failing.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        "Cache file {} is corrupt ({err}); starting with an empty cache",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache file at {}; starting fresh", path.display());
                HashMap::new()
            }
            Err(err) => {
                warn!(
                    "Could not read cache file {} ({err}); starting with an empty cache",
                    path.display()
                );
                HashMap::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// Looks up an address.
    ///
    /// Distinguishes "never seen" (`None`) from "seen, no answer"
    /// (`Some(None)`), so cached failures short-circuit the backend chain.
    pub fn get(&self, address: &str) -> Option<&Option<String>> {
        self.entries.get(address)
    }

    /// Records a lookup outcome, including absence.
    pub fn insert(&mut self, address: String, label: Option<String>) {
        self.entries.insert(address, label);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the cache back to its file.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` on serialization or filesystem failure. The
    /// caller logs and continues; losing the cache costs re-lookups on the
    /// next run, not correctness.
    pub fn persist(&self) -> Result<(), CacheError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let cache = CountryCache::load(&dir.path().join("nope.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();
        let cache = CountryCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_nulls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");

        let mut cache = CountryCache::load(&path);
        cache.insert("1.1.1.1".into(), Some("美国".into()));
        cache.insert("9.9.9.9".into(), None);
        cache.persist().unwrap();

        let reloaded = CountryCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("1.1.1.1"), Some(&Some("美国".to_string())));
        // The cached "no answer" survives the round trip as an explicit null.
        assert_eq!(reloaded.get("9.9.9.9"), Some(&None));
        assert_eq!(reloaded.get("8.8.8.8"), None);
    }

    #[test]
    fn test_persist_to_unwritable_path_errors() {
        let dir = TempDir::new().unwrap();
        let mut cache = CountryCache::load(&dir.path().join("missing-dir/cache.json"));
        cache.insert("1.1.1.1".into(), None);
        assert!(cache.persist().is_err());
    }
}
