use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use qa_types::ServiceCallError;
use serde::Serialize;

pub const NOT_FOUND_MESSAGE: &str = "Service Call not found.";
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching data.";

/// Body returned when a service call is unknown
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
	pub message: String,
}

/// Body returned for any data-source failure; never carries the cause
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
}

/// Outward-facing handler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
	NotFound,
	FetchFailed,
}

impl From<ServiceCallError> for ApiError {
	fn from(error: ServiceCallError) -> Self {
		match error {
			ServiceCallError::NotFound { .. } => ApiError::NotFound,
			ServiceCallError::DataSource(_) => ApiError::FetchFailed,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		match self {
			ApiError::NotFound => (
				StatusCode::NOT_FOUND,
				Json(NotFoundResponse {
					message: NOT_FOUND_MESSAGE.to_string(),
				}),
			)
				.into_response(),
			ApiError::FetchFailed => (
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(ErrorResponse {
					error: FETCH_FAILED_MESSAGE.to_string(),
				}),
			)
				.into_response(),
		}
	}
}
