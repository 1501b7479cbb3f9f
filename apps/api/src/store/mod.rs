//! Local persistence — a generic string key-value store with a file-backed
//! implementation. The draft layer (`drafts`) is the only writer.

pub mod drafts;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;

/// Minimal string-keyed store contract: read, whole-value replace, delete.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// File-backed store: one JSON object on disk mapping keys to string values.
/// Reads are forgiving — a missing or unreadable file is an empty store, so a
/// corrupt data file can never prevent startup.
pub struct FileKvStore {
    path: PathBuf,
    // serializes read-modify-write cycles between handlers
    lock: Mutex<()>,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!("store file {} is unreadable ({e}); treating as empty", self.path.display());
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating store directory {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing store file {}", self.path.display()))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().ok();
        Ok(self.read_map().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().ok();
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().ok();
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store used by tests in place of the file-backed one.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileKvStore {
        FileKvStore::new(dir.path().join("store.json"))
    }

    #[test]
    fn test_get_on_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("draft").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("draft", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("draft", "one").unwrap();
        store.set("draft", "two").unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_delete_removes_entry_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("draft", "value").unwrap();
        store.delete("draft").unwrap();
        assert_eq!(store.get("draft").unwrap(), None);
        // deleting again is fine
        store.delete("draft").unwrap();
    }

    #[test]
    fn test_corrupt_store_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{{{ not json").unwrap();
        let store = FileKvStore::new(&path);
        assert_eq!(store.get("draft").unwrap(), None);
        // and it recovers on the next write
        store.set("draft", "value").unwrap();
        assert_eq!(store.get("draft").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
