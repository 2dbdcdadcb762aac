use dishswipe::config::Config;
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::gateway_harness::GatewayTestServer;
use crate::store_harness::{ORDER, seeded_order, temp_pipeline};

#[tokio::test]
async fn health_is_served_over_http() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;

    let response = reqwest::Client::new()
        .get(server.url("/health"))
        .send()
        .await
        .expect("health request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("health body should be json");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "sqlite");
}

#[tokio::test]
async fn rating_round_trip_over_http() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let dishes = seeded_order(&pipeline).await;
    let server = GatewayTestServer::start(pipeline).await;
    let client = reqwest::Client::new();

    let created = client
        .post(server.url("/ratings"))
        .json(&json!({ "dish_id": dishes[0].id, "rating": "like" }))
        .send()
        .await
        .expect("rating request should complete");
    assert_eq!(created.status(), StatusCode::CREATED);

    let counts: Value = client
        .get(server.url(&format!("/dishes/{}/ratings", dishes[0].id)))
        .send()
        .await
        .expect("counts request should complete")
        .json()
        .await
        .expect("counts body should be json");
    assert_eq!(counts["likes"], 1);
    assert_eq!(counts["dislikes"], 0);

    let order = client
        .get(server.url(&format!("/orders/{ORDER}/dishes")))
        .send()
        .await
        .expect("order request should complete");
    assert_eq!(order.status(), StatusCode::OK);
    let order: Vec<Value> = order.json().await.expect("order body should be json");
    assert!(order.iter().any(|dish| dish["name"] == "Truffle Pasta"));
}

#[tokio::test]
async fn malformed_json_is_a_json_400() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;

    let response = reqwest::Client::new()
        .post(server.url("/ratings"))
        .json(&json!({ "dish_id": "x", "rating": "meh" }))
        .send()
        .await
        .expect("rating request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body should be json");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn rating_unknown_dish_is_404() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;

    let response = reqwest::Client::new()
        .post(server.url("/ratings"))
        .json(&json!({ "dish_id": "missing", "rating": "dislike" }))
        .send()
        .await
        .expect("rating request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_cors_list_allows_any_origin() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let server = GatewayTestServer::start(pipeline).await;

    let response = reqwest::Client::new()
        .get(server.url("/dishes"))
        .header("Origin", "https://diner.example")
        .send()
        .await
        .expect("dishes request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn configured_cors_list_rejects_other_origins() {
    let (_tmp, pipeline) = temp_pipeline().await;
    let mut config = Config::default();
    config.gateway.cors_origins = vec!["https://diner.example".into()];
    let server = GatewayTestServer::start_with(config, pipeline).await;
    let client = reqwest::Client::new();

    let allowed = client
        .get(server.url("/dishes"))
        .header("Origin", "https://diner.example")
        .send()
        .await
        .expect("dishes request should complete");
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("https://diner.example")
    );

    let other = client
        .get(server.url("/dishes"))
        .header("Origin", "https://elsewhere.example")
        .send()
        .await
        .expect("dishes request should complete");
    assert!(other.headers().get("access-control-allow-origin").is_none());
}
