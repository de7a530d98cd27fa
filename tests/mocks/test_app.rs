//! Test app for integration tests
//!
//! Builds the full router through `AggregatorBuilder` and drives it with
//! `tower::ServiceExt::oneshot`, no socket involved.

use axum::{
	body::{to_bytes, Body},
	http::{Request, StatusCode},
	Router,
};
use quote_aggregator::{AggregatorBuilder, Settings};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
	pub router: Router,
}

impl TestApp {
	pub async fn from_builder(builder: AggregatorBuilder) -> Self {
		let (router, _state) = builder.start().await.expect("start aggregator");
		Self { router }
	}

	#[allow(dead_code)]
	pub async fn from_settings(settings: Settings) -> Self {
		Self::from_builder(AggregatorBuilder::new().with_settings(settings)).await
	}

	/// GET `uri` and decode the JSON body
	pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
		let response = self
			.router
			.clone()
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();

		let status = response.status();
		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let json = if body.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&body).expect("json body")
		};
		(status, json)
	}
}
