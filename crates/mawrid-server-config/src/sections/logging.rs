// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration section.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_level() -> String {
	"info,tower_http::trace=debug".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"text" => Ok(LogFormat::Text),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("expected 'text' or 'json', got '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub format: Option<LogFormat>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(default_level),
			format: self.format.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	/// `EnvFilter` directive string; `RUST_LOG` overrides it at startup.
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_level(),
			format: LogFormat::Text,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = LoggingConfigLayer::default().finalize();
		assert_eq!(config, LoggingConfig::default());
		assert_eq!(config.level, "info,tower_http::trace=debug");
		assert_eq!(config.format, LogFormat::Text);
	}

	#[test]
	fn test_layer_finalize_with_values() {
		let layer = LoggingConfigLayer {
			level: Some("debug".to_string()),
			format: Some(LogFormat::Json),
		};
		let config = layer.finalize();
		assert_eq!(config.level, "debug");
		assert_eq!(config.format, LogFormat::Json);
	}

	#[test]
	fn test_merge() {
		let mut base = LoggingConfigLayer {
			level: Some("info".to_string()),
			format: None,
		};
		base.merge(LoggingConfigLayer {
			level: None,
			format: Some(LogFormat::Json),
		});
		assert_eq!(base.level, Some("info".to_string()));
		assert_eq!(base.format, Some(LogFormat::Json));
	}
}
