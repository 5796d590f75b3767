//! HTTP endpoints for the dashboard.
//!
//! Every endpoint is a GET returning JSON. A failed aggregation collapses
//! to a 500 with a fixed per-endpoint message; the underlying diagnostic
//! goes to the server log and never into the response body. Endpoints are
//! independent, so one failing aggregation leaves the others serving.

use crate::metrics::{funnel, recent, summary, FunnelStage, RecentDeal, SummaryMetrics};
use crate::server::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::error;

/// Client-visible error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// A failed endpoint. Carries only the fixed client-facing message.
struct ApiError {
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            JsonResponse(ErrorBody {
                message: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Create the dashboard API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/metrics", get(metrics))
        .route("/api/funnel", get(funnel_stages))
        .route("/api/recent", get(recent_deals))
        .route("/api/health", get(health))
        .with_state(state)
}

/// Summary counts and total value for the dashboard header
async fn metrics(
    State(state): State<AppState>,
) -> Result<JsonResponse<SummaryMetrics>, ApiError> {
    match state.warehouse.query(summary::SQL).await {
        Ok(batches) => Ok(JsonResponse(summary::normalize(&batches))),
        Err(e) => {
            error!("metrics endpoint error: {}", e);
            Err(ApiError {
                message: "Failed to fetch metrics from the warehouse",
            })
        }
    }
}

/// Per-stage deal counts grouped by pipeline
async fn funnel_stages(
    State(state): State<AppState>,
) -> Result<JsonResponse<Vec<FunnelStage>>, ApiError> {
    match state.warehouse.query(funnel::SQL).await {
        Ok(batches) => Ok(JsonResponse(funnel::normalize(&batches))),
        Err(e) => {
            error!("funnel endpoint error: {}", e);
            Err(ApiError {
                message: "Failed to fetch funnel data",
            })
        }
    }
}

/// Ten most recently updated deals
async fn recent_deals(
    State(state): State<AppState>,
) -> Result<JsonResponse<Vec<RecentDeal>>, ApiError> {
    match state.warehouse.query(recent::SQL).await {
        Ok(batches) => Ok(JsonResponse(recent::normalize(&batches))),
        Err(e) => {
            error!("recent deals endpoint error: {}", e);
            Err(ApiError {
                message: "Failed to fetch recent deals",
            })
        }
    }
}

/// Liveness probe, no warehouse round-trip
async fn health() -> JsonResponse<serde_json::Value> {
    JsonResponse(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
