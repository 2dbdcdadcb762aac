use crate::error::StoreError;
use crate::gesture::{Classification, GestureSample, classify};
use crate::observability::{ObserverEvent, ObserverMetric};
use crate::ratings::{Dish, DishOrder, NewDish, Rating, RatingCounts};
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use super::{AppState, AssociateBody, RatingBody, SwipeBody};

/// JSON error body with a matching status code.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        let status = match &error {
            StoreError::UnknownDish(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if !error.is_client_error() {
            tracing::error!(%error, "gateway.store_error");
        }
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.pipeline.store();
    let healthy = store.health_check().await;
    let subscriptions = state.pipeline.feed().active_subscriptions();
    state
        .pipeline
        .observer()
        .record_metric(&ObserverMetric::ActiveSubscriptions(subscriptions as u64));
    let body = serde_json::json!({
        "status": if healthy { "ok" } else { "degraded" },
        "store": store.name(),
        "subscriptions": subscriptions,
    });
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

/// GET /dishes
pub(super) async fn handle_list_dishes(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Dish>>> {
    Ok(Json(state.pipeline.fetch_dishes().await?))
}

/// POST /dishes
pub(super) async fn handle_insert_dish(
    State(state): State<AppState>,
    payload: Result<Json<NewDish>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Dish>)> {
    let Json(dish) = payload?;
    let dish = state.pipeline.insert_dish(dish).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// GET /orders/{order_number}/dishes
///
/// An unseen order number is recorded and yields an empty list.
pub(super) async fn handle_order_dishes(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> ApiResult<Json<Vec<Dish>>> {
    let dishes = state
        .pipeline
        .fetch_dishes_by_order_number(&order_number)
        .await?;
    Ok(Json(dishes))
}

/// POST /orders/{order_number}/dishes
pub(super) async fn handle_associate_dish(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    payload: Result<Json<AssociateBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DishOrder>)> {
    let Json(body) = payload?;
    let association = state
        .pipeline
        .associate_dish_with_order(&body.dish_id, &order_number)
        .await?;
    Ok((StatusCode::CREATED, Json(association)))
}

/// POST /ratings
pub(super) async fn handle_submit_rating(
    State(state): State<AppState>,
    payload: Result<Json<RatingBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Rating>)> {
    let Json(body) = payload?;
    let rating = state
        .pipeline
        .submit_rating(&body.dish_id, body.rating, body.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// GET /dishes/{dish_id}/ratings
pub(super) async fn handle_dish_counts(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
) -> ApiResult<Json<RatingCounts>> {
    Ok(Json(state.pipeline.get_ratings_count(&dish_id).await?))
}

#[derive(Debug, Serialize)]
pub(super) struct SwipeResponse {
    classification: Classification,
    rating: Option<Rating>,
}

/// POST /swipes
///
/// Classifies released-drag telemetry server-side. Decisive gestures are
/// rated immediately; there is no card to animate here.
pub(super) async fn handle_swipe(
    State(state): State<AppState>,
    payload: Result<Json<SwipeBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SwipeResponse>)> {
    let Json(body) = payload?;
    if !body.offset.is_finite() || !body.velocity.is_finite() {
        return Err(ApiError::bad_request("offset and velocity must be finite"));
    }

    let sample = GestureSample::new(body.offset, body.velocity);
    let classification = classify(sample, &state.config.gesture);
    state
        .pipeline
        .observer()
        .record_event(&ObserverEvent::GestureResolved {
            dish_id: body.dish_id.clone(),
            direction: classification.direction(),
        });

    let Some(direction) = classification.direction() else {
        return Ok((
            StatusCode::OK,
            Json(SwipeResponse {
                classification,
                rating: None,
            }),
        ));
    };

    let rating = state
        .pipeline
        .submit_rating(&body.dish_id, direction.outcome(), body.comment)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SwipeResponse {
            classification,
            rating: Some(rating),
        }),
    ))
}
