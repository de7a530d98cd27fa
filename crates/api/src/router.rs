use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{get_service_call, health, ready};
use crate::state::AppState;
// State is applied at the application level using `.with_state(...)`.

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/ready", get(ready))
		.route("/ready/", get(ready))
		.route("/service-call/{id}", get(get_service_call))
		.route("/service-call/{id}/", get(get_service_call))
		.route("/api/service-call/{id}", get(get_service_call))
		.route("/api/service-call/{id}/", get(get_service_call))
		.layer(cors)
		.layer(trace)
		.layer(req_id)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use async_trait::async_trait;
	use axum::{
		body::{to_bytes, Body},
		http::{Request, StatusCode},
	};
	use mockall::mock;
	use qa_service::{AggregatorService, ServiceCallAggregatorTrait, SourceHealth};
	use qa_storage::MemoryStore;
	use qa_types::{
		AggregatedResult, EquipmentRow, QuoteRevision, ServiceCallError, ServiceCallResult,
		StorageError,
	};
	use serde_json::Value;
	use tower::ServiceExt;

	use super::*;

	mock! {
		pub Aggregator {}

		#[async_trait]
		impl ServiceCallAggregatorTrait for Aggregator {
			async fn aggregate(&self, service_call_id: &str) -> ServiceCallResult<AggregatedResult>;
			async fn health_check_all(&self) -> SourceHealth;
		}
	}

	fn app(aggregator: Arc<dyn ServiceCallAggregatorTrait>) -> Router {
		create_router().with_state(AppState::new(aggregator))
	}

	fn seeded_app() -> Router {
		let store = MemoryStore::new();
		let mut row = EquipmentRow::new("SC-1");
		row.customer_name = Some("Acme Corp".to_string());
		row.equipment_type = Some("ATS Panel".to_string());
		row.model = Some("A-1".to_string());
		store.add_equipment(row);
		store.add_revision(QuoteRevision {
			service_call_id: "SC-1".to_string(),
			revision: 1,
			customer_name: None,
			tech_rate: 95.0,
			travel_rate: 75.0,
		});

		let service = AggregatorService::new(Arc::new(store.clone()), Arc::new(store));
		app(Arc::new(service))
	}

	async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
		let response = app
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, serde_json::from_slice(&body).unwrap())
	}

	#[tokio::test]
	async fn test_health() {
		let (status, body) = get_json(seeded_app(), "/health").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["status"], "healthy");
	}

	#[tokio::test]
	async fn test_both_paths_serve_the_aggregate() {
		for uri in ["/service-call/SC-1", "/api/service-call/SC-1"] {
			let (status, body) = get_json(seeded_app(), uri).await;
			assert_eq!(status, StatusCode::OK, "{}", uri);
			assert_eq!(body["revisions"][0]["revision"], 1);
			assert_eq!(body["revisions"][0]["rates"]["tech"], 95.0);
			assert_eq!(body["baseData"]["customer"]["company"], "Acme Corp");
			assert_eq!(body["baseData"]["unitInfo"]["ats.model"], "A-1");
		}
	}

	#[tokio::test]
	async fn test_unknown_call_returns_404_message() {
		let (status, body) = get_json(seeded_app(), "/service-call/SC-2").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, serde_json::json!({"message": "Service Call not found."}));
	}

	#[tokio::test]
	async fn test_data_source_failure_hides_cause() {
		let mut aggregator = MockAggregator::new();
		aggregator.expect_aggregate().returning(|_| {
			Err(ServiceCallError::DataSource(StorageError::Query {
				message: "no such table: sv00300".to_string(),
			}))
		});

		let (status, body) = get_json(app(Arc::new(aggregator)), "/service-call/SC-1").await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			body,
			serde_json::json!({"error": "An error occurred while fetching data."})
		);
		assert!(!body.to_string().contains("sv00300"));
	}

	#[tokio::test]
	async fn test_ready_degraded_when_a_source_is_down() {
		let mut aggregator = MockAggregator::new();
		aggregator.expect_health_check_all().returning(|| SourceHealth {
			erp: false,
			quotes: true,
		});

		let (status, body) = get_json(app(Arc::new(aggregator)), "/ready").await;
		assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(body["status"], "degraded");
		assert_eq!(body["erp"], false);
		assert_eq!(body["quotes"], true);
	}

	#[tokio::test]
	async fn test_ready_when_sources_are_up() {
		let (status, body) = get_json(seeded_app(), "/ready").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["status"], "ready");
	}

	#[tokio::test]
	async fn test_request_id_is_propagated() {
		let response = seeded_app()
			.oneshot(
				Request::builder()
					.uri("/health")
					.header("x-request-id", "req-42")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.headers()["x-request-id"], "req-42");
	}
}
