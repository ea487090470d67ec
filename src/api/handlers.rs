//! Route handlers and shared state for the webhook server.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::events::ProductEvent;
use crate::sync::SyncHandler;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<SyncHandler>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(handler: Arc<SyncHandler>) -> Self {
        Self {
            handler,
            start_time: Instant::now(),
        }
    }
}

/// Wire envelope the commerce backend posts to `/events`.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Webhook endpoint. Known events always get a 200: sync failures are
/// logged and dropped, never surfaced to the sender. Unknown event names or
/// unparseable payloads get a 400.
pub async fn receive_event(
    State(state): State<AppState>,
    Json(envelope): Json<EventEnvelope>,
) -> impl IntoResponse {
    match ProductEvent::from_wire(&envelope.event, envelope.data) {
        Ok(event) => {
            state.handler.process(event).await;
            (StatusCode::OK, Json(json!({ "received": true }))).into_response()
        }
        Err(e) => {
            tracing::warn!("rejected event {}: {e}", envelope.event);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid_event".to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Static greeting stub, unrelated to the sync logic.
pub async fn custom_get() -> impl IntoResponse {
    Json(json!({ "message": "[GET] Hello world!" }))
}

/// Static greeting stub, unrelated to the sync logic.
pub async fn custom_post() -> impl IntoResponse {
    Json(json!({ "message": "[POST] Hello world!" }))
}
