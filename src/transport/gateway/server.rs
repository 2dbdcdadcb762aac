use super::handlers::{
    handle_associate_dish, handle_dish_counts, handle_health, handle_insert_dish,
    handle_list_dishes, handle_order_dishes, handle_submit_rating, handle_swipe,
};
use super::websocket::ws_handler;
use super::{AppState, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS};

use crate::config::Config;
use crate::error::TransportError;
use crate::ratings::RatingPipeline;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Bind `host:port` and serve the gateway until shutdown.
pub async fn run_gateway(
    host: &str,
    port: u16,
    config: Arc<Config>,
    pipeline: RatingPipeline,
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|error| TransportError::Gateway(format!("invalid bind address: {error}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(host, listener, config, pipeline).await
}

/// Serve the gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
    pipeline: RatingPipeline,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    let display_addr = format!("{host}:{actual_port}");

    print_gateway_banner(&display_addr, pipeline.store().name());
    tracing::info!(addr = %display_addr, "gateway.listening");

    let cors_origins = config.gateway.cors_origins.clone();
    let state = AppState::new(config, pipeline);
    let app = build_app(state, &cors_origins);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway.stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn print_gateway_banner(display_addr: &str, store: &str) {
    println!("DishSwipe gateway listening on {display_addr} (store: {store})");
    println!("  GET  /health");
    println!("  GET  /dishes");
    println!("  POST /dishes");
    println!("  GET  /orders/{{order_number}}/dishes");
    println!("  POST /orders/{{order_number}}/dishes");
    println!("  POST /ratings");
    println!("  GET  /dishes/{{dish_id}}/ratings");
    println!("  POST /swipes");
    println!("  GET  /ws -> WebSocket");
}

/// Router with every route, the body limit, the request timeout and CORS.
///
/// An empty `cors_origins` list allows any origin.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/dishes", get(handle_list_dishes).post(handle_insert_dish))
        .route(
            "/orders/{order_number}/dishes",
            get(handle_order_dishes).post(handle_associate_dish),
        )
        .route("/ratings", post(handle_submit_rating))
        .route("/dishes/{dish_id}/ratings", get(handle_dish_counts))
        .route("/swipes", post(handle_swipe))
        .route("/ws", get(ws_handler));

    let cors = if cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<_> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    app.with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .layer(
            cors.allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        )
}
