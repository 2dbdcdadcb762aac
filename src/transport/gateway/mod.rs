//! Axum HTTP/WebSocket surface over the rating pipeline.
//!
//! - Request body size limit (64KB max)
//! - Request timeout (30s)
//! - JSON error bodies `{ "error": ... }`
//! - `/ws` realtime feed of inserted ratings

mod events;
mod handlers;
mod server;
mod websocket;

pub use events::{ClientMessage, ServerMessage};
pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::config::Config;
use crate::ratings::RatingPipeline;
use std::sync::Arc;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: RatingPipeline,
}

impl AppState {
    pub fn new(config: Arc<Config>, pipeline: RatingPipeline) -> Self {
        Self { config, pipeline }
    }
}

/// POST /ratings body
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct RatingBody {
    pub dish_id: String,
    pub rating: crate::ratings::Outcome,
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST /swipes body
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SwipeBody {
    pub dish_id: String,
    pub offset: f64,
    pub velocity: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// POST /orders/{order_number}/dishes body
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct AssociateBody {
    pub dish_id: String,
}
