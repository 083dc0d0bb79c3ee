//! Durable storage for the ledger.
//!
//! `LedgerBackend` is the seam between `LedgerStore` and the medium. The
//! file backend writes the whole ledger to a temporary file in the target
//! directory, syncs it, then renames it over the old file, so a crash
//! mid-write leaves the previous ledger intact.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use tracing::debug;

use super::snapshot::Ledger;
use crate::core::error::StoreError;

/// Storage medium for a whole ledger.
pub trait LedgerBackend: Send + Sync {
    /// Read the durable ledger. Absent or empty storage is an empty ledger.
    fn load(&self) -> Result<Ledger, StoreError>;

    /// Durably replace the stored ledger. Must not return before the data
    /// would survive a crash.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;
}

fn parse_ledger(bytes: &[u8], origin: &Path) -> Result<Ledger, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Ledger::new());
    }
    serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupted {
        path: origin.to_path_buf(),
        source,
    })
}

/// JSON file backend with atomic replace.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl LedgerBackend for JsonFileBackend {
    fn load(&self) -> Result<Ledger, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => parse_ledger(&bytes, &self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                Ok(Ledger::new())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(ledger).map_err(StoreError::Encode)?;
        self.write_atomically(&bytes).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), users = ledger.len(), "ledger saved");
        Ok(())
    }
}

/// In-memory backend holding the serialized ledger text.
///
/// Used by tests: it goes through the same JSON encoding as the file
/// backend and can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<String>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing JSON text.
    #[must_use]
    pub fn from_json(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(text.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent `load` and `save` fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current stored text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory backend set to fail".into()));
        }
        Ok(())
    }
}

impl LedgerBackend for MemoryBackend {
    fn load(&self) -> Result<Ledger, StoreError> {
        self.check()?;
        parse_ledger(self.contents().as_bytes(), Path::new("<memory>"))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.check()?;
        let text = serde_json::to_string(ledger).map_err(StoreError::Encode)?;
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = text;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::UserRecord;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.insert_new("u1", UserRecord::new("ada"));
        ledger.insert_new("u2", UserRecord::new("bo"));
        ledger
    }

    #[test]
    fn test_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("user_data.json"));

        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_empty_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, "").unwrap();

        assert!(JsonFileBackend::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_file_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested/user_data.json"));

        backend.save(&sample_ledger()).unwrap();
        let loaded = backend.load().unwrap();

        assert_eq!(loaded, sample_ledger());
    }

    #[test]
    fn test_file_corrupted_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, "{\"u1\": {\"username\": ").unwrap();

        let err = JsonFileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[test]
    fn test_file_invalid_utf8_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.json");
        std::fs::write(&path, b"{\"u1\": {\"username\": \"\xff\xfe\"}}").unwrap();

        let err = JsonFileBackend::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_file_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("user_data.json"));

        backend.save(&sample_ledger()).unwrap();
        backend.save(&Ledger::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_memory_failing() {
        let backend = MemoryBackend::new();
        backend.save(&sample_ledger()).unwrap();

        backend.set_failing(true);
        assert!(backend.load().unwrap_err().is_unavailable());
        assert!(backend.save(&Ledger::new()).is_err());

        backend.set_failing(false);
        assert_eq!(backend.load().unwrap().len(), 2);
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn test_memory_corrupted() {
        let backend = MemoryBackend::from_json("not json");
        assert!(matches!(backend.load(), Err(StoreError::Corrupted { .. })));
    }
}
