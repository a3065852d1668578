//! # Storage Module
//!
//! Harmony keeps no in-process state between commands. Everything that
//! survives lives in two flat files: the externally maintained catalog and
//! the usage log this program owns. [`Storage`] is the seam the handlers talk
//! to, so the recommendation, logging and admin flows can run against the real
//! files ([`FileStorage`]) or an in-memory fake ([`MemoryStorage`]).
//!
//! File access is not synchronized. Two processes appending at once rely on
//! the OS append semantics and nothing else.

use crate::catalog::{self, SongRecord};
use crate::config::DEFAULT_CATALOG;
use crate::usage_log::{self, UsageLogEntry};
use log::{debug, info};
use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures a handler needs to tell apart.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Catalog file does not exist
    #[error("catalog file '{0}' is missing")]
    CatalogMissing(PathBuf),

    /// Catalog exists but could not be parsed
    #[error("{0}")]
    CatalogMalformed(String),

    /// Log exists but is empty or could not be parsed
    #[error("usage log is unreadable: {0}")]
    LogUnreadable(String),

    /// Any other I/O failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Persistence collaborator shared by every screen.
pub trait Storage {
    /// Load the full catalog, fresh, on every call.
    fn load_catalog(&self) -> Result<Vec<SongRecord>, StorageError>;

    /// Append exactly one row to the usage log.
    fn append_log_entry(&self, entry: &UsageLogEntry) -> Result<(), StorageError>;

    /// Read the whole usage log. `Ok(None)` means no log exists yet.
    fn read_log(&self) -> Result<Option<Vec<UsageLogEntry>>, StorageError>;

    /// Delete the usage log. Deleting an absent log succeeds.
    fn clear_log(&self) -> Result<(), StorageError>;
}

/// [`Storage`] backed by files on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    catalog_path: PathBuf,
    log_path: PathBuf,
}

impl FileStorage {
    pub fn new(catalog_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            log_path: log_path.into(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl Storage for FileStorage {
    fn load_catalog(&self) -> Result<Vec<SongRecord>, StorageError> {
        debug!("Loading catalog from {}", self.catalog_path.display());
        let file = match File::open(&self.catalog_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::CatalogMissing(self.catalog_path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        catalog::parse_catalog(file).map_err(StorageError::CatalogMalformed)
    }

    fn append_log_entry(&self, entry: &UsageLogEntry) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(entry.to_line().as_bytes())?;
        debug!("Appended usage row for '{}' to {}", entry.user_name, self.log_path.display());
        Ok(())
    }

    fn read_log(&self) -> Result<Option<Vec<UsageLogEntry>>, StorageError> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        usage_log::parse_log(file)
            .map(Some)
            .map_err(StorageError::LogUnreadable)
    }

    fn clear_log(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.log_path) {
            Ok(()) => {
                info!("Deleted usage log {}", self.log_path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory [`Storage`] with the same parsing rules as [`FileStorage`].
///
/// `None` stands in for an absent file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    catalog: Option<String>,
    log: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Storage whose catalog file is missing.
    pub fn without_catalog() -> Self {
        Self::default()
    }

    pub fn with_catalog(csv: impl Into<String>) -> Self {
        Self {
            catalog: Some(csv.into()),
            log: RefCell::new(None),
        }
    }

    /// Seed the log with raw contents, as if the file already existed.
    pub fn with_log(self, contents: impl Into<String>) -> Self {
        *self.log.borrow_mut() = Some(contents.into());
        self
    }

    /// Raw log contents, `None` when no log "file" exists.
    pub fn raw_log(&self) -> Option<String> {
        self.log.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load_catalog(&self) -> Result<Vec<SongRecord>, StorageError> {
        match &self.catalog {
            Some(csv) => catalog::parse_catalog(csv.as_bytes()).map_err(StorageError::CatalogMalformed),
            None => Err(StorageError::CatalogMissing(PathBuf::from(DEFAULT_CATALOG))),
        }
    }

    fn append_log_entry(&self, entry: &UsageLogEntry) -> Result<(), StorageError> {
        self.log
            .borrow_mut()
            .get_or_insert_with(String::new)
            .push_str(&entry.to_line());
        Ok(())
    }

    fn read_log(&self) -> Result<Option<Vec<UsageLogEntry>>, StorageError> {
        match self.log.borrow().as_deref() {
            Some(raw) => usage_log::parse_log(raw.as_bytes())
                .map(Some)
                .map_err(StorageError::LogUnreadable),
            None => Ok(None),
        }
    }

    fn clear_log(&self) -> Result<(), StorageError> {
        self.log.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_storage(dir: &TempDir) -> FileStorage {
        FileStorage::new(dir.path().join("songs.csv"), dir.path().join("user_usage_logs.csv"))
    }

    #[test]
    fn test_missing_catalog_is_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = file_storage(&dir);
        assert!(matches!(
            storage.load_catalog(),
            Err(StorageError::CatalogMissing(_))
        ));
    }

    #[test]
    fn test_append_creates_and_extends_log() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = file_storage(&dir);

        assert!(storage.read_log()?.is_none());
        storage.append_log_entry(&UsageLogEntry::new("Ann", "Calm", 4, "SongA"))?;
        storage.append_log_entry(&UsageLogEntry::new("Bo", "Stress", 8, "SongB"))?;

        let raw = fs::read_to_string(storage.log_path())?;
        assert_eq!(raw, "Ann,Calm,4,SongA\nBo,Stress,8,SongB\n");

        let entries = storage.read_log()?.expect("log should exist");
        assert_eq!(entries.len(), 2);
        Ok(())
    }

    #[test]
    fn test_clear_removes_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = file_storage(&dir);
        storage.append_log_entry(&UsageLogEntry::new("Ann", "Calm", 4, "SongA"))?;

        storage.clear_log()?;
        assert!(!storage.log_path().exists());
        assert!(storage.read_log()?.is_none());

        // Clearing twice is fine.
        storage.clear_log()?;
        Ok(())
    }

    #[test]
    fn test_empty_log_file_is_unreadable() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = file_storage(&dir);
        fs::write(storage.log_path(), "")?;
        assert!(matches!(storage.read_log(), Err(StorageError::LogUnreadable(_))));
        Ok(())
    }

    #[test]
    fn test_memory_storage_mirrors_file_semantics() {
        let storage = MemoryStorage::without_catalog();
        match storage.load_catalog() {
            Err(StorageError::CatalogMissing(path)) => assert_eq!(path, Path::new(DEFAULT_CATALOG)),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(storage.read_log().unwrap().is_none());

        storage
            .append_log_entry(&UsageLogEntry::new("Ann", "Calm", 4, "SongA"))
            .unwrap();
        assert_eq!(storage.raw_log().as_deref(), Some("Ann,Calm,4,SongA\n"));

        storage.clear_log().unwrap();
        assert!(storage.raw_log().is_none());
    }
}
