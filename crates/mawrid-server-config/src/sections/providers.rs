// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Selection of the identity, storage and document backends.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
	/// Firebase identity, Cloud Storage and the SQLite document store.
	#[default]
	Remote,
	/// Process-local fakes for every collaborator. Nothing survives a restart.
	Memory,
}

impl fmt::Display for ProviderMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProviderMode::Remote => write!(f, "remote"),
			ProviderMode::Memory => write!(f, "memory"),
		}
	}
}

impl FromStr for ProviderMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"remote" => Ok(ProviderMode::Remote),
			"memory" => Ok(ProviderMode::Memory),
			other => Err(format!("expected 'remote' or 'memory', got '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvidersConfig {
	pub mode: ProviderMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfigLayer {
	#[serde(default)]
	pub mode: Option<ProviderMode>,
}

impl ProvidersConfigLayer {
	pub fn merge(&mut self, other: ProvidersConfigLayer) {
		if other.mode.is_some() {
			self.mode = other.mode;
		}
	}

	pub fn finalize(self) -> ProvidersConfig {
		ProvidersConfig {
			mode: self.mode.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_remote() {
		assert_eq!(
			ProvidersConfigLayer::default().finalize().mode,
			ProviderMode::Remote
		);
	}

	#[test]
	fn test_parse_mode() {
		assert_eq!("Memory".parse::<ProviderMode>(), Ok(ProviderMode::Memory));
		assert!("firestore".parse::<ProviderMode>().is_err());
	}

	#[test]
	fn test_toml_mode() {
		let layer: ProvidersConfigLayer = toml::from_str("mode = \"memory\"").unwrap();
		assert_eq!(layer.mode, Some(ProviderMode::Memory));
	}
}
