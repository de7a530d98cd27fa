use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse { status: "healthy" })
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
	pub status: &'static str,
	pub erp: bool,
	pub quotes: bool,
}

/// GET /ready - Readiness probe over both data sources
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let health = state.aggregator_service.health_check_all().await;

	let (code, status) = if health.all_healthy() {
		(StatusCode::OK, "ready")
	} else {
		(StatusCode::SERVICE_UNAVAILABLE, "degraded")
	};

	let body = ReadinessResponse {
		status,
		erp: health.erp,
		quotes: health.quotes,
	};
	(code, Json(body))
}
