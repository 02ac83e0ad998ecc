//! String key-value storage standing in for browser local storage.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Synchronous string storage. Implementations must make `set` durable
/// before returning.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the value cannot be written durably.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing medium rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One file per key under a data directory.
///
/// Writes go to a uniquely named temp file in the same directory, are
/// synced, then renamed over the target, so a crash mid-write leaves either
/// the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| io_err(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| io_err(&path, e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path, e)),
        }
    }
}

/// Process-local storage for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "[1,2]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1,2]"));

        store.set("cart", "[3]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[3]"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").expect("removing twice is fine");
    }

    #[test]
    fn file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path());
        store.set("token", "abc").unwrap();
        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("def"));

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["token".to_owned()]);
    }

    #[test]
    fn file_store_writes_do_not_share_a_temp_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Leftovers from a crashed writer must not block later writes.
        std::fs::create_dir(dir.path().join(".cart.tmp")).unwrap();
        std::fs::write(dir.path().join(".theme.tmp"), "stale").unwrap();

        let mut first = FileStore::new(dir.path());
        let mut second = FileStore::new(dir.path());
        first.set("cart", "[1]").unwrap();
        second.set("cart", "[2]").unwrap();
        first.set("theme", "dark").unwrap();

        assert_eq!(first.get("cart").unwrap().as_deref(), Some("[2]"));
        assert_eq!(second.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn memory_store_tracks_entries() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
