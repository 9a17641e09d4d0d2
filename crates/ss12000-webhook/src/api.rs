use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

pub const ACK_MESSAGE: &str = "Webhook received successfully!";

/// Change notification posted by an SS12000 server.
///
/// The server spells the modified list `modifiedEntites`; the correct
/// spelling is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Notification {
    #[serde(rename = "modifiedEntites", alias = "modifiedEntities", default)]
    pub modified_entities: Vec<String>,
    #[serde(rename = "deletedEntities", default)]
    pub deleted_entities: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    notifications: mpsc::Sender<Notification>,
}

impl AppState {
    pub fn new(notifications: mpsc::Sender<Notification>) -> Self {
        Self { notifications }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    fn new(request_id: String, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
            },
            meta: ResponseMeta {
                request_id,
                timestamp: Utc::now(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code {
            "bad_request" => StatusCode::BAD_REQUEST,
            "queue_full" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct Ack {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

pub fn build_app(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(receive_notification))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn receive_notification(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let notification: Notification = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "rejected webhook with invalid JSON body");
        ApiError::new(req_id.0.clone(), "bad_request", "invalid JSON body")
    })?;

    tracing::info!(
        request_id = %req_id.0,
        modified = notification.modified_entities.len(),
        deleted = notification.deleted_entities.len(),
        "received SS12000 webhook"
    );

    match state.notifications.try_send(notification) {
        Ok(()) => Ok(Json(Ack {
            message: ACK_MESSAGE,
        })),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(request_id = %req_id.0, "webhook queue full");
            Err(ApiError::new(
                req_id.0,
                "queue_full",
                "notification queue is full, retry later",
            ))
        }
        Err(TrySendError::Closed(_)) => {
            tracing::error!(request_id = %req_id.0, "webhook worker has stopped");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "notification worker unavailable",
            ))
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(Health { status: "ok" })
}
