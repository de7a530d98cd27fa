//! Service-call handlers
use axum::{
	extract::{Path, State},
	response::Json,
};
use qa_types::AggregatedResult;
use tracing::debug;

use crate::handlers::common::ApiError;
use crate::state::AppState;

/// GET /service-call/{id} - Aggregated revisions and base data for a service call
pub async fn get_service_call(
	State(state): State<AppState>,
	Path(service_call_id): Path<String>,
) -> Result<Json<AggregatedResult>, ApiError> {
	debug!("Received service call lookup for {}", service_call_id);

	let result = state
		.aggregator_service
		.aggregate(&service_call_id)
		.await?;
	Ok(Json(result))
}
