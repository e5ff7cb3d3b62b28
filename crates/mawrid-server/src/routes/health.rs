// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tokio::time::Instant;

use crate::{
	api::AppState,
	health::{self, HealthComponents, HealthResponse, HealthStatus},
};

#[utoipa::path(
	get,
	path = "/health",
	responses(
		(status = 200, description = "System is healthy", body = HealthResponse),
		(status = 503, description = "System is unhealthy", body = HealthResponse)
	),
	tag = "health"
)]
/// GET /health - Document store probe plus backend summary.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let overall_start = Instant::now();

	let components = HealthComponents {
		document_store: health::check_document_store(state.store.as_ref()).await,
		providers: health::check_providers(state.provider_mode),
	};

	let status = health::aggregate_status(&components);
	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: overall_start.elapsed().as_millis() as u64,
		version: env!("CARGO_PKG_VERSION").to_string(),
		components,
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
