//! InMemoryDocumentStore - RwLock-backed document for testing and development.

use std::sync::{Arc, RwLock};

use super::{DocumentStore, StoreError};
use crate::collection::Snapshot;

/// In-memory document store. Clone-friendly via Arc; clones share the document.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    document: Arc<RwLock<Snapshot>>,
}

impl InMemoryDocumentStore {
    /// Create a store holding an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given document.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            document: Arc::new(RwLock::new(snapshot)),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let document = self
            .document
            .read()
            .map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(document.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut document = self
            .document
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        *document = snapshot.clone();
        Ok(())
    }
}
