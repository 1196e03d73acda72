//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tracing::{error, warn};

use crate::domain::Coordinate;
use crate::recommend::RecommendError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/networks", get(list_networks))
        .route("/sessions/:id", delete(end_session))
        .route("/sessions/:id/location", put(share_location))
        .route("/sessions/:id/recommend", post(recommend))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the networks that can be queried.
async fn list_networks(State(state): State<AppState>) -> Json<NetworksResponse> {
    let networks = state
        .engine
        .supported_networks()
        .iter()
        .map(|n| n.to_string())
        .collect();
    Json(NetworksResponse { networks })
}

/// Store the user's current location in their session.
async fn share_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<StatusCode, AppError> {
    let location =
        Coordinate::new(req.latitude, req.longitude).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    state.sessions.share_location(&id, location).await;
    Ok(StatusCode::NO_CONTENT)
}

/// End a session, forgetting its location.
async fn end_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.sessions.remove(&id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Recommend stations near the session's location.
async fn recommend(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    // Unknown sessions behave like sessions without a location
    let session = state.sessions.get(&id).await.unwrap_or_default();
    let engine = Arc::clone(&state.engine);

    let recommendation =
        tokio::task::spawn_blocking(move || engine.recommend(&req.network, &session))
            .await
            .map_err(|e| AppError::Internal {
                message: format!("recommendation task failed: {e}"),
            })??;

    Ok(Json(RecommendationResponse::from(&recommendation)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
    },
    NotFound {
        message: String,
    },
    Conflict {
        message: String,
    },
    Unavailable {
        message: String,
    },
    Internal {
        message: String,
    },
    /// Stations were chosen but their counters were not saved
    Unsaved {
        message: String,
        recommendation: RecommendationResponse,
    },
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        let message = e.to_string();
        match e {
            RecommendError::UnknownNetwork(_) => AppError::BadRequest { message },
            RecommendError::MissingLocation => AppError::Conflict { message },
            RecommendError::InsufficientOptions { .. } => AppError::NotFound { message },
            RecommendError::DataSource(_) => AppError::Unavailable { message },
            RecommendError::FeedbackNotPersisted { recommendation, .. } => AppError::Unsaved {
                message,
                recommendation: RecommendationResponse::from(recommendation.as_ref()),
            },
            RecommendError::Persistence(_) | RecommendError::Feedback(_) => {
                AppError::Internal { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, recommendation) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message, None),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message, None),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
            AppError::Unsaved {
                message,
                recommendation,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message,
                Some(recommendation),
            ),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            recommendation,
        });
        (status, body).into_response()
    }
}
