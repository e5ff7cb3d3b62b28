// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
	/// Single allowed origin, or `*` for any.
	pub allowed_origin: String,
}

impl CorsConfig {
	pub fn allows_any_origin(&self) -> bool {
		self.allowed_origin == ANY_ORIGIN
	}
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origin: ANY_ORIGIN.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfigLayer {
	#[serde(default)]
	pub allowed_origin: Option<String>,
}

impl CorsConfigLayer {
	pub fn merge(&mut self, other: CorsConfigLayer) {
		if other.allowed_origin.is_some() {
			self.allowed_origin = other.allowed_origin;
		}
	}

	pub fn finalize(self) -> CorsConfig {
		CorsConfig {
			allowed_origin: self
				.allowed_origin
				.unwrap_or_else(|| ANY_ORIGIN.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_to_any_origin() {
		assert!(CorsConfigLayer::default().finalize().allows_any_origin());
	}

	#[test]
	fn test_specific_origin() {
		let config = CorsConfigLayer {
			allowed_origin: Some("https://admin.mawrid.sa".to_string()),
		}
		.finalize();
		assert!(!config.allows_any_origin());
		assert_eq!(config.allowed_origin, "https://admin.mawrid.sa");
	}
}
