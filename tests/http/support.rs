use std::sync::Arc;

use serde_json::{json, Value};
use shop_analytics::{http, CollectionRepository, InMemoryDocumentStore, Snapshot};

pub type Repo = Arc<CollectionRepository<InMemoryDocumentStore>>;

pub fn seeded() -> Snapshot {
    serde_json::from_value(json!({
        "products": [
            { "id": 1, "name": "Mint Pods", "category": "Pods", "price": 250, "cost": 150, "stock": 40 },
            { "id": 2, "name": "Mango Juice", "category": "Liquids", "price": 180, "cost": 90, "stock": 25 }
        ],
        "customers": [
            { "id": 1, "name": "Ana", "age": 27, "totalSpent": 430, "totalPurchases": 2, "joinDate": "2024-01-15" }
        ],
        "sales": [
            { "id": 1, "productId": 1, "customerId": 1, "employeeId": 1, "quantity": 1, "total": 250, "date": "2024-05-01" },
            { "id": 2, "productId": 2, "customerId": 1, "employeeId": 1, "quantity": 1, "total": 180, "date": "2024-05-02" }
        ],
        "employees": [
            { "id": 1, "name": "Eve", "salary": 15000 }
        ],
        "inventory": []
    }))
    .unwrap()
}

pub fn repo() -> Repo {
    Arc::new(CollectionRepository::new(
        InMemoryDocumentStore::with_snapshot(seeded()),
    ))
}

/// Bind to port 0 and return the base URL.
pub async fn start_server(repo: Repo) -> String {
    let app = http::router(repo);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn read_json(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}
