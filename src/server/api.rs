//! REST API handlers for the coordinator server
//!
//! Wire contracts mirror the coordinator protocol: session state is returned
//! exactly as its tagged form (`{status, result?, message?}`), and the event
//! stream pushes the same notification objects the coordinator broadcasts.

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::{AnalysisConfig, Config};
use crate::extract::prepare_submission;
use crate::metrics;
use crate::models::SessionId;

use super::AppState;

// ============================================================================
// API Types
// ============================================================================

/// Submission request from an extractor or viewer
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Session the text belongs to; generated when omitted
    pub session_id: Option<SessionId>,

    /// Text to analyze (already extracted from the page)
    pub text: String,
}

/// Acknowledgement for an accepted submission
#[derive(Debug, Serialize)]
pub struct AnalyzeAccepted {
    pub session_id: SessionId,
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub sessions: usize,
}

// ============================================================================
// Router
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and metrics
        .route("/api/health", get(health_check))
        .route("/metrics", get(export_metrics))
        // Analysis lifecycle
        .route("/api/analyze", post(submit_analysis))
        .route(
            "/api/sessions/{session_id}",
            get(get_session_state).delete(end_session),
        )
        .route("/api/events", get(event_stream))
        // Config surface
        .route("/api/config", get(get_config).put(update_config))
        .with_state(state)
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();
    let sessions = state.coordinator.session_count().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
        sessions,
    })
}

/// Prometheus text exposition
async fn export_metrics() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to encode metrics: {e}"))),
        )
            .into_response(),
    }
}

// ============================================================================
// Analysis Handlers
// ============================================================================

/// Accept a text submission and start an analysis attempt
///
/// Texts below the configured minimum are rejected here, before any session
/// state is touched; over-budget texts are condensed to the head+tail form.
async fn submit_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let config = state.coordinator.config().resolve().await;

    let prepared =
        match prepare_submission(&request.text, config.min_text_chars, config.max_text_chars) {
            Ok(text) => text,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
                    .into_response();
            }
        };

    let session_id = request.session_id.unwrap_or_else(SessionId::generate);

    // Fire-and-forget: the caller observes the outcome via poll or events
    let _handle = state
        .coordinator
        .submit_text(session_id.clone(), prepared)
        .await;

    (StatusCode::ACCEPTED, Json(AnalyzeAccepted { session_id })).into_response()
}

/// Current analysis state for a session (`Idle` when unknown)
async fn get_session_state(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session_id = SessionId::from(session_id);
    Json(state.coordinator.get_state(&session_id).await)
}

/// Remove a session when its context is torn down
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session_id = SessionId::from(session_id);
    state.coordinator.end_session(&session_id).await;
    StatusCode::NO_CONTENT
}

/// Server-sent stream of state-change notifications
///
/// Subscribers attach and detach freely; a lagging subscriber skips missed
/// notifications and reconciles by polling session state.
async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.coordinator.subscribe();

    let stream = futures::stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(change) => match Event::default().event("analysis_status").json_data(&change) {
                    Ok(event) => return Some((Ok::<_, Infallible>(event), receiver)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode state change event");
                        continue;
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event subscriber lagged behind");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ============================================================================
// Config Handlers
// ============================================================================

/// Read the current analysis config record
async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.coordinator.config().resolve().await)
}

/// Replace the analysis config record
///
/// Takes effect on the next submission; in-flight attempts keep the record
/// they resolved.
async fn update_config(
    State(state): State<AppState>,
    Json(record): Json<AnalysisConfig>,
) -> impl IntoResponse {
    let candidate = Config {
        analysis: record.clone(),
        ..Config::default()
    };

    if let Err(e) = candidate.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
            .into_response();
    }

    state.coordinator.config().update(record.clone()).await;
    tracing::info!(backend_url = %record.backend_url, "Analysis config updated");

    Json(record).into_response()
}
