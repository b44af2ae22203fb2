//! The persistence port for the finance document.
//!
//! The store only ever reads the whole document once at startup and writes the whole document
//! after each change, so the port is a single key-value slot.

use crate::{utils, Result};
use anyhow::bail;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// A single slot that holds the serialized finance document.
pub trait Storage: Debug {
    /// Returns the stored document, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document.
    fn write(&mut self, document: &str) -> Result<()>;
}

/// Implements `Storage` as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        trace!("read {}", self.path.display());
        if !self.path.exists() {
            return Ok(None);
        }
        utils::read(&self.path).map(Some)
    }

    fn write(&mut self, document: &str) -> Result<()> {
        trace!("write {}", self.path.display());
        // Write next to the target and rename so a failed write never truncates the document
        let tmp = self.path.with_extension("json.tmp");
        utils::write(&tmp, document)?;
        utils::rename(&tmp, &self.path)
    }
}

/// Implements `Storage` in memory. Clones share the same slot, so a test can keep a handle and
/// look at what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(document.into()))),
            fail_writes: false,
        }
    }

    /// Makes every subsequent write fail, as a full disk would.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// The current contents of the slot.
    pub fn document(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        match self.slot.lock() {
            Ok(slot) => Ok(slot.clone()),
            Err(_) => bail!("The in-memory storage lock is poisoned"),
        }
    }

    fn write(&mut self, document: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Writes to this storage are disabled");
        }
        match self.slot.lock() {
            Ok(mut slot) => {
                *slot = Some(document.to_string());
                Ok(())
            }
            Err(_) => bail!("The in-memory storage lock is poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("finance_data.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("finance_data.json"));
        storage.write("{\"a\":1}").unwrap();
        storage.write("{\"a\":2}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(!dir.path().join("finance_data.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_write_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nope").join("finance_data.json"));
        assert!(storage.write("{}").is_err());
    }

    #[test]
    fn test_memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.write("doc").unwrap();
        assert_eq!(storage.document().as_deref(), Some("doc"));
        assert_eq!(storage.read().unwrap().as_deref(), Some("doc"));
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let mut storage = MemoryStorage::with_document("old").failing_writes();
        assert!(storage.write("new").is_err());
        assert_eq!(storage.document().as_deref(), Some("old"));
    }
}
