// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;
use std::str::FromStr;

use mawrid_common_config::{load_secret_env, SecretString};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	CorsConfigLayer, DatabaseConfigLayer, HttpConfigLayer, IdentityConfigLayer, LoggingConfigLayer,
	ProvidersConfigLayer, StorageConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/mawrid/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: MAWRID_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			cors: Some(load_cors_from_env()),
			database: Some(load_database_from_env()),
			identity: Some(load_identity_from_env()?),
			storage: Some(load_storage_from_env()?),
			providers: Some(load_providers_from_env()?),
			logging: Some(load_logging_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
	T::Err: std::fmt::Display,
{
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|e| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid value '{v}': {e}"),
		}),
		None => Ok(None),
	}
}

fn env_secret(name: &str) -> Result<Option<SecretString>, ConfigError> {
	load_secret_env(name).map_err(|e| ConfigError::Secret(e.to_string()))
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("MAWRID_SERVER_HOST"),
		port: env_parse("MAWRID_SERVER_PORT")?,
		max_upload_bytes: env_parse("MAWRID_SERVER_MAX_UPLOAD_BYTES")?,
		request_timeout_secs: env_parse("MAWRID_SERVER_REQUEST_TIMEOUT_SECS")?,
	})
}

fn load_cors_from_env() -> CorsConfigLayer {
	CorsConfigLayer {
		allowed_origin: env_var("MAWRID_SERVER_CORS_ALLOWED_ORIGIN"),
	}
}

fn load_database_from_env() -> DatabaseConfigLayer {
	DatabaseConfigLayer {
		url: env_var("MAWRID_SERVER_DATABASE_URL"),
	}
}

fn load_identity_from_env() -> Result<IdentityConfigLayer, ConfigError> {
	Ok(IdentityConfigLayer {
		project_id: env_var("MAWRID_SERVER_IDENTITY_PROJECT_ID"),
		api_base_url: env_var("MAWRID_SERVER_IDENTITY_API_BASE_URL"),
		access_token: env_secret("MAWRID_SERVER_IDENTITY_ACCESS_TOKEN")?,
	})
}

fn load_storage_from_env() -> Result<StorageConfigLayer, ConfigError> {
	Ok(StorageConfigLayer {
		bucket: env_var("MAWRID_SERVER_STORAGE_BUCKET"),
		api_base_url: env_var("MAWRID_SERVER_STORAGE_API_BASE_URL"),
		public_base_url: env_var("MAWRID_SERVER_STORAGE_PUBLIC_BASE_URL"),
		access_token: env_secret("MAWRID_SERVER_STORAGE_ACCESS_TOKEN")?,
	})
}

fn load_providers_from_env() -> Result<ProvidersConfigLayer, ConfigError> {
	Ok(ProvidersConfigLayer {
		mode: env_parse("MAWRID_SERVER_PROVIDERS_MODE")?,
	})
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	Ok(LoggingConfigLayer {
		level: env_var("MAWRID_SERVER_LOG_LEVEL"),
		format: env_parse("MAWRID_SERVER_LOG_FORMAT")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_order() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn test_missing_toml_is_empty_layer() {
		let layer = TomlSource::new("/nonexistent/mawrid/server.toml")
			.load()
			.unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_sections_parse() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[http]
port = 9090
max_upload_bytes = 2048

[cors]
allowed_origin = "https://admin.mawrid.sa"

[storage]
bucket = "mawrid-uploads"

[providers]
mode = "memory"

[logging]
format = "json"
"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();

		let http = layer.http.unwrap();
		assert_eq!(http.port, Some(9090));
		assert_eq!(http.max_upload_bytes, Some(2048));
		assert_eq!(
			layer.cors.unwrap().allowed_origin.as_deref(),
			Some("https://admin.mawrid.sa")
		);
		assert_eq!(
			layer.storage.unwrap().bucket.as_deref(),
			Some("mawrid-uploads")
		);
		assert_eq!(
			layer.providers.unwrap().mode,
			Some(crate::sections::ProviderMode::Memory)
		);
		assert_eq!(
			layer.logging.unwrap().format,
			Some(crate::sections::LogFormat::Json)
		);
	}

	#[test]
	fn test_invalid_toml_reports_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[http\nport = ").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { ref path, .. } if path == file.path()));
	}
}
