use serde_json::json;
use shop_analytics::{Collection, RepositoryError, MAX_RECORDS_PER_COLLECTION};

use crate::support::{fixture, ids, record};

#[test]
fn insert_assigns_smallest_free_id() {
    let f = fixture();
    for name in ["a", "b", "c"] {
        f.repo
            .insert(Collection::Products, record(json!({ "name": name })))
            .unwrap();
    }
    f.repo.delete(Collection::Products, 2).unwrap();

    let created = f
        .repo
        .insert(Collection::Products, record(json!({ "name": "d" })))
        .unwrap();
    assert_eq!(created["id"], 2);
    assert_eq!(ids(&f.repo.list(Collection::Products).unwrap()), vec![1, 2, 3]);
}

#[test]
fn capacity_is_enforced_without_side_effects() {
    let f = fixture();
    for n in 0..MAX_RECORDS_PER_COLLECTION {
        f.repo
            .insert(Collection::Sales, record(json!({ "total": n })))
            .unwrap();
    }
    let before = f.repo.list(Collection::Sales).unwrap();

    let err = f
        .repo
        .insert(Collection::Sales, record(json!({ "total": 999 })))
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::CapacityExceeded { limit: 20, .. }
    ));
    assert_eq!(
        err.to_string(),
        "Cannot add more than 20 records to sales. Delete a record first."
    );
    assert_eq!(f.repo.list(Collection::Sales).unwrap(), before);

    // Other collections are unaffected by a full one.
    assert!(f
        .repo
        .insert(Collection::Customers, record(json!({ "name": "Ana" })))
        .is_ok());
}

#[test]
fn patch_merges_but_keeps_id() {
    let f = fixture();
    f.repo
        .insert(
            Collection::Customers,
            record(json!({ "name": "Ana", "age": 22, "totalSpent": 100 })),
        )
        .unwrap();

    let updated = f
        .repo
        .patch(
            Collection::Customers,
            1,
            record(json!({ "id": 42, "totalSpent": 250, "vip": true })),
        )
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(updated),
        json!({ "name": "Ana", "age": 22, "totalSpent": 250, "id": 1, "vip": true })
    );
    assert!(f.repo.get(Collection::Customers, 42).unwrap().is_none());
    assert_eq!(
        f.repo.get(Collection::Customers, 1).unwrap().unwrap()["totalSpent"],
        250
    );
}

#[test]
fn patch_and_delete_of_missing_ids_fail() {
    let f = fixture();
    let err = f
        .repo
        .patch(Collection::Employees, 7, record(json!({ "name": "x" })))
        .unwrap_err();
    assert_eq!(err.to_string(), "No record found in employees with id 7");

    f.repo
        .insert(Collection::Employees, record(json!({ "name": "Eve" })))
        .unwrap();
    let removed = f.repo.delete(Collection::Employees, 1).unwrap();
    assert_eq!(removed["name"], "Eve");

    assert!(matches!(
        f.repo.delete(Collection::Employees, 1),
        Err(RepositoryError::NotFound { id: 1, .. })
    ));
}

#[test]
fn mutations_survive_a_new_repository() {
    let f = fixture();
    f.repo
        .insert(Collection::Inventory, record(json!({ "sku": "X-1" })))
        .unwrap();

    let reopened = shop_analytics::CollectionRepository::new(f.repo.store().clone());
    let records = reopened.list(Collection::Inventory).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["sku"], "X-1");
}
