//! Tests for AggregatorBuilder wiring

mod mocks;

use quote_aggregator::config::ConfigurableValue;
use quote_aggregator::mocks::demo_store;
use quote_aggregator::{AggregatorBuilder, ServiceCallAggregatorTrait, ServiceCallError, Settings};

#[tokio::test]
async fn test_builder_with_memory_store() {
	let (_router, state) = AggregatorBuilder::new()
		.with_storage(demo_store())
		.start()
		.await
		.expect("start");

	let result = state
		.aggregator_service
		.aggregate("SC-1")
		.await
		.expect("aggregate");
	assert_eq!(result.revisions.len(), 1);
	assert_eq!(result.revisions[0].parts.len(), 2);
}

#[tokio::test]
async fn test_builder_state_reports_not_found() {
	let (_router, state) = AggregatorBuilder::new()
		.with_storage(demo_store())
		.start()
		.await
		.expect("start");

	let result = state.aggregator_service.aggregate("SC-404").await;
	assert!(matches!(result, Err(ServiceCallError::NotFound { .. })));
}

#[tokio::test]
async fn test_invalid_settings_rejected() {
	let mut settings = Settings::default();
	settings.server.port = 0;

	let result = AggregatorBuilder::new()
		.with_settings(settings)
		.with_storage(demo_store())
		.start()
		.await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_unresolvable_database_path_rejected() {
	let mut settings = Settings::default();
	settings.database.erp_path = ConfigurableValue::from_env("QA_TEST_UNSET_ERP_DB_PATH");

	let result = AggregatorBuilder::new()
		.with_settings(settings)
		.with_quotes(demo_store())
		.start()
		.await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_settings_accessor() {
	let builder = AggregatorBuilder::new().with_settings(Settings::default());
	assert_eq!(builder.settings().map(|s| s.server.port), Some(3000));
	assert!(AggregatorBuilder::new().settings().is_none());
}

#[tokio::test]
async fn test_builder_from_sqlite_settings() {
	let fixture = mocks::SqliteFixture::sc1();

	let (_router, state) = AggregatorBuilder::new()
		.with_settings(fixture.settings())
		.start()
		.await
		.expect("start");

	let health = state.aggregator_service.health_check_all().await;
	assert!(health.all_healthy());
}
