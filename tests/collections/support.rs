use serde_json::Value;
use shop_analytics::{CollectionRepository, JsonFileStore, Record};
use tempfile::TempDir;

pub struct Fixture {
    // Held so the directory outlives the repository.
    pub _dir: TempDir,
    pub repo: CollectionRepository<JsonFileStore>,
}

/// A fresh document in a temporary directory.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open_or_init(dir.path().join("data").join("database.json")).unwrap();
    Fixture {
        _dir: dir,
        repo: CollectionRepository::new(store),
    }
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

pub fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().filter_map(shop_analytics::record_id).collect()
}
