use crate::support::{read_json, repo, start_server};

#[tokio::test]
async fn descriptive_report() {
    let base = start_server(repo()).await;
    let resp = reqwest::get(format!("{base}/api/analytics/descriptive"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["totalSales"], 430.0);
    assert_eq!(body["averageSale"], 215.0);
    assert_eq!(body["totalProducts"], 2);
    // 40*150 + 25*90
    assert_eq!(body["totalInventoryValue"], 8250.0);
    assert_eq!(body["ageDistribution"][0]["name"], "25-29");
}

#[tokio::test]
async fn predictive_report() {
    let base = start_server(repo()).await;
    let body = read_json(
        reqwest::get(format!("{base}/api/analytics/predictive"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["historical"].as_array().unwrap().len(), 2);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 10);
    assert_eq!(body["forecast"][0]["day"], 3);
    assert_eq!(body["trend"]["currentTrend"], "Decreasing");
    assert_eq!(body["trend"]["confidence"], "Medium");
}

#[tokio::test]
async fn prescriptive_report() {
    let base = start_server(repo()).await;
    let body = read_json(
        reqwest::get(format!("{base}/api/analytics/prescriptive"))
            .await
            .unwrap(),
    )
    .await;

    // One unit each over ten days leaves plenty of stock.
    assert_eq!(body["inventory"], serde_json::json!([]));
    assert_eq!(body["totalReorderCost"], 0.0);
    assert!(body["employees"].is_array());
}
