use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use client_logging::{client_debug, client_info};
use thiserror::Error;

use crate::{AtomicFileWriter, PersistError};

pub const STORE_FILENAME: &str = "local_storage.ron";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("malformed store file {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("could not serialize store: {0}")]
    Serialize(String),
}

/// String-to-string storage with no expiry, in the manner of browser local storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys in one RON file under `dir`, rewritten atomically on every change.
///
/// The in-memory map only changes once the file write succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    writer: AtomicFileWriter,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(STORE_FILENAME);
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => ron::from_str(&text).map_err(|err| StoreError::Malformed {
                path: path.clone(),
                message: err.to_string(),
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        client_info!("Opened local store {:?} ({} keys)", path, entries.len());
        Ok(Self {
            path,
            writer: AtomicFileWriter::new(dir.to_path_buf()),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&next, pretty)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.writer.write(STORE_FILENAME, &content)?;
        self.entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        client_debug!("Store set {} ({} bytes)", key, value.len());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        client_debug!("Store remove {}", key);
        self.commit(next)
    }
}
