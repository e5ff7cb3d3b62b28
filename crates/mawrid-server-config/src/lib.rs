// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Mawrid server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`MAWRID_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use mawrid_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub cors: CorsConfig,
	pub database: DatabaseConfig,
	pub identity: IdentityConfig,
	pub storage: StorageConfig,
	pub providers: ProvidersConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MAWRID_SERVER_*`)
/// 2. Config file (`/etc/mawrid/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let config = ServerConfig {
		http: layer.http.unwrap_or_default().finalize(),
		cors: layer.cors.unwrap_or_default().finalize(),
		database: layer.database.unwrap_or_default().finalize(),
		identity: layer.identity.unwrap_or_default().finalize(),
		storage: layer.storage.unwrap_or_default().finalize(),
		providers: layer.providers.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		providers = %config.providers.mode,
		cors_origin = %config.cors.allowed_origin,
		max_upload_bytes = config.http.max_upload_bytes,
		"Server configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
	if config.http.max_upload_bytes == 0 {
		return Err(ConfigError::InvalidValue {
			key: "http.max_upload_bytes".to_string(),
			message: "must be greater than zero".to_string(),
		});
	}

	if config.providers.mode != ProviderMode::Remote {
		return Ok(());
	}

	let mut missing = Vec::new();
	if config.identity.project_id.is_none() {
		missing.push("MAWRID_SERVER_IDENTITY_PROJECT_ID");
	}
	if config.identity.access_token.is_none() {
		missing.push("MAWRID_SERVER_IDENTITY_ACCESS_TOKEN");
	}
	if config.storage.bucket.is_none() {
		missing.push("MAWRID_SERVER_STORAGE_BUCKET");
	}
	if config.storage.access_token.is_none() {
		missing.push("MAWRID_SERVER_STORAGE_ACCESS_TOKEN");
	}

	if !missing.is_empty() {
		return Err(ConfigError::Validation(format!(
			"remote providers need {}; set them or use MAWRID_SERVER_PROVIDERS_MODE=memory",
			missing.join(", ")
		)));
	}

	Ok(())
}
