//! JsonFileStore - the document as a pretty-printed JSON file on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{DocumentStore, StoreError};
use crate::collection::Snapshot;

/// File-backed document store.
///
/// Every `load` re-reads the file; there is no in-memory cache. `save` writes
/// a sibling `.tmp` file and renames it over the document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use an existing document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the document at `path`, creating an empty one (and its parent
    /// directories) when the file does not exist yet.
    pub fn open_or_init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        match fs::metadata(&store.path) {
            Ok(_) => Ok(store),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| store.io_error(e))?;
                }
                tracing::info!(path = %store.path.display(), "initialising empty document");
                store.save(&Snapshot::default())?;
                Ok(store)
            }
            Err(err) => Err(store.io_error(err)),
        }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, err: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if !value.is_object() {
            return Err(StoreError::Parse("document root must be an object".into()));
        }
        let snapshot: Snapshot = serde_json::from_value(value)?;
        tracing::debug!(path = %self.path.display(), bytes = raw.len(), "document loaded");
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let rendered = serde_json::to_string_pretty(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, &rendered).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), bytes = rendered.len(), "document saved");
        Ok(())
    }
}
