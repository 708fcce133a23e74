//! Document stores - whole-document persistence for the [`Snapshot`].
//!
//! A store only knows how to load and save the entire document. Every
//! mutation made through the collection layer is a full read-modify-write.
//!
//! ## Example
//!
//! ```ignore
//! use shop_analytics::{DocumentStore, JsonFileStore};
//!
//! let store = JsonFileStore::open_or_init("data/database.json")?;
//! let mut snapshot = store.load()?;
//! snapshot.products.clear();
//! store.save(&snapshot)?;
//! ```

mod in_memory;
mod json_file;

use std::fmt;
use std::path::PathBuf;

use crate::collection::Snapshot;

pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;

/// Abstract whole-document storage.
pub trait DocumentStore: Send + Sync {
    /// Read the full document.
    fn load(&self) -> Result<Snapshot, StoreError>;

    /// Replace the full document.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Filesystem error at the given path.
    Io { path: PathBuf, message: String },
    /// The document is not valid JSON or its root is not an object.
    Parse(String),
    /// An in-process lock was poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, message } => {
                write!(f, "document io error at {}: {}", path.display(), message)
            }
            StoreError::Parse(msg) => write!(f, "document parse error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Snapshot, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
