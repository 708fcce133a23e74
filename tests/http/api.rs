use serde_json::json;
use shop_analytics::{Collection, MAX_RECORDS_PER_COLLECTION};

use crate::support::{read_json, repo, start_server};

#[tokio::test]
async fn health_lists_collections() {
    let base = start_server(repo()).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["collections"],
        json!(["products", "customers", "sales", "employees", "inventory"])
    );
}

#[tokio::test]
async fn whole_document() {
    let base = start_server(repo()).await;
    let body = read_json(reqwest::get(format!("{base}/api/data")).await.unwrap()).await;

    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["sales"][1]["total"], 180);
    assert_eq!(body["inventory"], json!([]));
}

#[tokio::test]
async fn list_reports_count() {
    let base = start_server(repo()).await;
    let resp = reqwest::get(format!("{base}/api/products")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["collection"], "products");
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Mint Pods");
}

#[tokio::test]
async fn unknown_collection_is_404_with_supported_list() {
    let base = start_server(repo()).await;
    let client = reqwest::Client::new();

    let requests = [
        client.get(format!("{base}/api/widgets")),
        client
            .post(format!("{base}/api/widgets"))
            .json(&json!({ "name": "x" })),
        client.get(format!("{base}/api/widgets/1")),
        client
            .patch(format!("{base}/api/widgets/1"))
            .json(&json!({ "name": "x" })),
        client.delete(format!("{base}/api/widgets/1")),
        client.get(format!("{base}/api/widgets/abc")),
        client
            .patch(format!("{base}/api/widgets/abc"))
            .json(&json!({ "name": "x" })),
        client.delete(format!("{base}/api/widgets/abc")),
    ];

    for request in requests {
        let resp = request.send().await.unwrap();
        let url = resp.url().to_string();
        assert_eq!(resp.status(), 404, "{url}");

        let body = read_json(resp).await;
        assert_eq!(body["error"], "Unknown collection: widgets", "{url}");
        assert_eq!(
            body["supported"],
            json!(["products", "customers", "sales", "employees", "inventory"]),
            "{url}"
        );
    }
}

#[tokio::test]
async fn get_by_id() {
    let base = start_server(repo()).await;

    let resp = reqwest::get(format!("{base}/api/customers/1")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["name"], "Ana");

    let resp = reqwest::get(format!("{base}/api/customers/9")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        read_json(resp).await["error"],
        "No record found in customers with id 9"
    );

    let resp = reqwest::get(format!("{base}/api/customers/abc")).await.unwrap();
    assert_eq!(resp.status(), 400);

    let resp = reqwest::get(format!("{base}/api/customers/1.5")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn create_assigns_id_and_returns_201() {
    let repo = repo();
    let base = start_server(repo.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/employees"))
        .json(&json!({ "id": 77, "name": "Finn", "salary": 12000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body = read_json(resp).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Finn");
    assert_eq!(repo.list(Collection::Employees).unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_non_object_bodies() {
    let base = start_server(repo()).await;
    let client = reqwest::Client::new();

    for body in ["[1, 2]", "\"text\"", "not json"] {
        let resp = client
            .post(format!("{base}/api/products"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "body {body}");
        assert_eq!(
            read_json(resp).await["error"],
            "Invalid JSON payload. Expected an object."
        );
    }
}

#[tokio::test]
async fn create_beyond_capacity_is_400() {
    let repo = repo();
    let base = start_server(repo.clone()).await;
    let client = reqwest::Client::new();

    for n in 1..MAX_RECORDS_PER_COLLECTION {
        let resp = client
            .post(format!("{base}/api/customers"))
            .json(&json!({ "name": format!("c{n}") }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = client
        .post(format!("{base}/api/customers"))
        .json(&json!({ "name": "one too many" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        read_json(resp).await["error"],
        "Cannot add more than 20 records to customers. Delete a record first."
    );
    assert_eq!(
        repo.list(Collection::Customers).unwrap().len(),
        MAX_RECORDS_PER_COLLECTION
    );
}

#[tokio::test]
async fn patch_merges_fields() {
    let base = start_server(repo()).await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{base}/api/products/2"))
        .json(&json!({ "id": 5, "stock": 10, "featured": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["stock"], 10);
    assert_eq!(body["featured"], true);
    assert_eq!(body["name"], "Mango Juice");

    let resp = client
        .patch(format!("{base}/api/products/8"))
        .json(&json!({ "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let base = start_server(repo()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/sales/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, json!({ "success": true }));

    let resp = client
        .delete(format!("{base}/api/sales/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
