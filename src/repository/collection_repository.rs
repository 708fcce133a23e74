//! CollectionRepository - list/get/insert/patch/delete over a document store.

use std::collections::HashSet;
use std::sync::Mutex;

use serde_json::Value;

use super::RepositoryError;
use crate::collection::{record_id, Collection, Record, Snapshot};
use crate::store::DocumentStore;

/// No collection may hold more records than this.
pub const MAX_RECORDS_PER_COLLECTION: usize = 20;

/// CRUD access to the collections of one document.
///
/// Mutations are serialised by an in-process mutex so two requests handled by
/// the same process cannot interleave their read-modify-write cycles.
pub struct CollectionRepository<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: DocumentStore> CollectionRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The whole document, as stored.
    pub fn snapshot(&self) -> Result<Snapshot, RepositoryError> {
        Ok(self.store.load()?)
    }

    /// All records of a collection, ascending by id. Records without a
    /// readable id sort as id 0.
    pub fn list(&self, collection: Collection) -> Result<Vec<Record>, RepositoryError> {
        let mut snapshot = self.store.load()?;
        let mut records = std::mem::take(snapshot.records_mut(collection));
        records.sort_by_key(|r| record_id(r).unwrap_or(0));
        Ok(records)
    }

    /// The record with the given id, if any.
    pub fn get(&self, collection: Collection, id: i64) -> Result<Option<Record>, RepositoryError> {
        Ok(self
            .list(collection)?
            .into_iter()
            .find(|r| record_id(r) == Some(id)))
    }

    /// Append a record, assigning the smallest positive id not in use.
    ///
    /// Any `id` in the payload is overwritten.
    pub fn insert(&self, collection: Collection, payload: Record) -> Result<Record, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("insert"))?;

        let mut snapshot = self.store.load()?;
        let records = snapshot.records_mut(collection);

        if records.len() >= MAX_RECORDS_PER_COLLECTION {
            return Err(RepositoryError::CapacityExceeded {
                collection,
                limit: MAX_RECORDS_PER_COLLECTION,
            });
        }

        let id = next_free_id(records);
        let mut record = payload;
        record.insert("id".to_string(), Value::from(id));
        records.push(record.clone());

        self.store.save(&snapshot)?;
        tracing::info!(%collection, id, "record inserted");
        Ok(record)
    }

    /// Shallow-merge `updates` over the record with the given id. The id itself
    /// is never changed by the payload.
    pub fn patch(
        &self,
        collection: Collection,
        id: i64,
        updates: Record,
    ) -> Result<Record, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("patch"))?;

        let mut snapshot = self.store.load()?;
        let record = snapshot
            .records_mut(collection)
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or(RepositoryError::NotFound { collection, id })?;

        for (key, value) in updates {
            record.insert(key, value);
        }
        record.insert("id".to_string(), Value::from(id));
        let updated = record.clone();

        self.store.save(&snapshot)?;
        tracing::info!(%collection, id, "record patched");
        Ok(updated)
    }

    /// Remove the record with the given id, returning it.
    pub fn delete(&self, collection: Collection, id: i64) -> Result<Record, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned("delete"))?;

        let mut snapshot = self.store.load()?;
        let records = snapshot.records_mut(collection);
        let index = records
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or(RepositoryError::NotFound { collection, id })?;
        let removed = records.remove(index);

        self.store.save(&snapshot)?;
        tracing::info!(%collection, id, "record deleted");
        Ok(removed)
    }
}

/// Smallest positive integer not used as an id in `records`.
fn next_free_id(records: &[Record]) -> i64 {
    let used: HashSet<i64> = records
        .iter()
        .filter_map(record_id)
        .filter(|id| *id > 0)
        .collect();
    (1..).find(|candidate| !used.contains(candidate)).unwrap_or(1)
}
