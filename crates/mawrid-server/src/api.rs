// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router construction and collaborator wiring.

use axum::{
	extract::DefaultBodyLimit,
	http::HeaderValue,
	routing::{delete, get, post, put},
	Json, Router,
};
use mawrid_server_config::{CorsConfig, ProviderMode, ServerConfig};
use mawrid_server_db::{
	create_pool, run_migrations, InMemorySupplierStore, SqliteSupplierStore, SupplierStore,
};
use mawrid_server_identity::{
	FirebaseIdentityClient, FirebaseIdentityConfig, IdentityProvider, InMemoryIdentityProvider,
};
use mawrid_server_storage::{BlobStore, GcsBlobStore, GcsConfig, InMemoryBlobStore};
use mawrid_server_suppliers::SupplierWorkflow;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::{api_docs::ApiDoc, error::StartupError, routes};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub workflow: Arc<SupplierWorkflow>,
	/// Same store the workflow writes to; used by the health probe.
	pub store: Arc<dyn SupplierStore>,
	pub provider_mode: ProviderMode,
	pub max_upload_bytes: usize,
}

impl AppState {
	pub fn new(
		identity: Arc<dyn IdentityProvider>,
		blobs: Arc<dyn BlobStore>,
		store: Arc<dyn SupplierStore>,
	) -> Self {
		let workflow = SupplierWorkflow::new(identity, blobs, Arc::clone(&store));
		Self {
			workflow: Arc::new(workflow),
			store,
			provider_mode: ProviderMode::Remote,
			max_upload_bytes: 10 * 1024 * 1024,
		}
	}

	pub fn with_provider_mode(mut self, mode: ProviderMode) -> Self {
		self.provider_mode = mode;
		self
	}

	pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
		self.max_upload_bytes = max_upload_bytes;
		self
	}
}

/// Build the collaborators selected by `providers.mode` and wrap them in state.
pub async fn create_app_state(config: &ServerConfig) -> Result<AppState, StartupError> {
	let state = match config.providers.mode {
		ProviderMode::Memory => {
			tracing::warn!("using in-memory providers; records are lost on restart");
			AppState::new(
				Arc::new(InMemoryIdentityProvider::new()),
				Arc::new(InMemoryBlobStore::new()),
				Arc::new(InMemorySupplierStore::new()),
			)
		}
		ProviderMode::Remote => {
			let timeout = Duration::from_secs(config.http.request_timeout_secs);

			let identity = FirebaseIdentityClient::new(FirebaseIdentityConfig {
				api_base_url: config.identity.api_base_url.clone(),
				project_id: config
					.identity
					.project_id
					.clone()
					.ok_or(StartupError::MissingConfig("identity.project_id"))?,
				access_token: config
					.identity
					.access_token
					.clone()
					.ok_or(StartupError::MissingConfig("identity.access_token"))?,
				timeout,
			})?;

			let blobs = GcsBlobStore::new(GcsConfig {
				api_base_url: config.storage.api_base_url.clone(),
				public_base_url: config.storage.public_base_url.clone(),
				bucket: config
					.storage
					.bucket
					.clone()
					.ok_or(StartupError::MissingConfig("storage.bucket"))?,
				access_token: config
					.storage
					.access_token
					.clone()
					.ok_or(StartupError::MissingConfig("storage.access_token"))?,
				timeout,
			})?;

			let pool = create_pool(&config.database.url).await?;
			run_migrations(&pool).await?;
			tracing::info!(url = %config.database.url, "document store ready");

			AppState::new(
				Arc::new(identity),
				Arc::new(blobs),
				Arc::new(SqliteSupplierStore::new(pool)),
			)
		}
	};

	Ok(state
		.with_provider_mode(config.providers.mode)
		.with_max_upload_bytes(config.http.max_upload_bytes))
}

/// CORS policy for the configured origin (`*` allows any).
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, StartupError> {
	let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
	if config.allows_any_origin() {
		return Ok(layer.allow_origin(Any));
	}

	let origin = HeaderValue::from_str(&config.allowed_origin)
		.map_err(|_| StartupError::InvalidCorsOrigin(config.allowed_origin.clone()))?;
	Ok(layer.allow_origin(origin))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
	Json(ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
	let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

	Router::new()
		.route(
			"/api/get-supplier/{id}",
			get(routes::suppliers::get_supplier),
		)
		.route(
			"/api/create-supplier",
			post(routes::suppliers::create_supplier),
		)
		.route(
			"/api/edit-supplier/{id}",
			put(routes::suppliers::edit_supplier),
		)
		.route(
			"/api/delete-supplier/{id}",
			delete(routes::suppliers::delete_supplier),
		)
		.route(
			"/api/approve-supplier/{id}",
			put(routes::suppliers::approve_supplier),
		)
		.route(
			"/api/authenticate-supplier/{id}",
			post(routes::suppliers::authenticate_supplier),
		)
		.route("/health", get(routes::health::health_check))
		.route("/api-docs/openapi.json", get(openapi_json))
		.layer(body_limit)
		.with_state(state)
}
