//! Concurrency tests for the price service.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use price_service::context::CorrelationId;

mod common;

#[tokio::test]
async fn test_concurrent_requests_do_not_mix() {
    let server = common::start_server(common::test_config()).await;
    let client = reqwest::Client::new();

    let (eth, sol) = tokio::join!(
        client.get(format!("{}/?ticker=ETH", server.url())).send(),
        client.get(format!("{}/?ticker=SOL", server.url())).send(),
    );
    let (eth, sol) = (eth.unwrap(), sol.unwrap());

    let eth_id = eth.headers()["x-request-id"].to_str().unwrap().to_string();
    let sol_id = sol.headers()["x-request-id"].to_str().unwrap().to_string();
    assert_ne!(eth_id, sol_id);

    assert_eq!(eth.text().await.unwrap(), r#"{"ticker":"ETH","price":1000}"#);
    assert_eq!(sol.text().await.unwrap(), r#"{"ticker":"SOL","price":100}"#);

    // Each backend record carries the id returned to its own caller.
    for record in server.sink.records() {
        let id = record.correlation_id.map(|id| id.to_string()).unwrap();
        match record.symbol.as_str() {
            "ETH" => assert_eq!(id, eth_id),
            "SOL" => assert_eq!(id, sol_id),
            other => panic!("unexpected symbol {other}"),
        }
    }
}

#[tokio::test]
async fn test_load_performance() {
    let server = common::start_server(common::test_config()).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;
    let symbols = ["BTC", "ETH", "XRP", "SOL", "DOT", "LINK", "UNI", "DOGE"];

    let client = reqwest::Client::new();
    let start = Instant::now();

    let tasks = (0..concurrency).map(|task| {
        let client = client.clone();
        let url = server.url();
        tokio::spawn(async move {
            let mut seen = Vec::new();
            for i in 0..requests_per_task {
                let symbol = symbols[(task + i) % symbols.len()];
                let res = client
                    .get(format!("{}/?ticker={}", url, symbol))
                    .send()
                    .await
                    .unwrap();
                let status = res.status();
                let id = res.headers()["x-request-id"].to_str().unwrap().to_string();
                let body: serde_json::Value = res.json().await.unwrap();

                if symbol == "DOGE" {
                    assert_eq!(status, 500);
                    assert!(body["error"].is_string());
                } else {
                    assert_eq!(status, 200);
                    assert_eq!(body["ticker"], symbol);
                }
                seen.push(id);
            }
            seen
        })
    });

    let mut ids = HashSet::new();
    for result in join_all(tasks).await {
        ids.extend(result.unwrap());
    }
    let duration = start.elapsed();

    assert_eq!(ids.len(), total_requests, "correlation ids collided");
    assert_eq!(server.sink.records().len(), total_requests);

    let record_ids: HashSet<CorrelationId> = server
        .sink
        .records()
        .iter()
        .filter_map(|r| r.correlation_id)
        .collect();
    assert_eq!(record_ids.len(), total_requests);

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!(
        "Requests/sec:   {:.2}",
        total_requests as f64 / duration.as_secs_f64()
    );
    println!("-------------------------\n");

    assert!(duration < Duration::from_secs(30));
}
