use std::sync::Arc;

use qa_service::ServiceCallAggregatorTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<dyn ServiceCallAggregatorTrait>,
}

impl AppState {
	pub fn new(aggregator_service: Arc<dyn ServiceCallAggregatorTrait>) -> Self {
		Self { aggregator_service }
	}
}
