// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity provider (Firebase Identity Toolkit) configuration.

use mawrid_common_config::SecretString;
use serde::Deserialize;

pub const DEFAULT_IDENTITY_API_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Clone)]
pub struct IdentityConfig {
	pub project_id: Option<String>,
	pub api_base_url: String,
	pub access_token: Option<SecretString>,
}

impl Default for IdentityConfig {
	fn default() -> Self {
		IdentityConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfigLayer {
	#[serde(default)]
	pub project_id: Option<String>,
	#[serde(default)]
	pub api_base_url: Option<String>,
	/// Only loaded from the environment (`..._ACCESS_TOKEN` or `..._ACCESS_TOKEN_FILE`).
	#[serde(skip)]
	pub access_token: Option<SecretString>,
}

impl IdentityConfigLayer {
	pub fn merge(&mut self, other: IdentityConfigLayer) {
		if other.project_id.is_some() {
			self.project_id = other.project_id;
		}
		if other.api_base_url.is_some() {
			self.api_base_url = other.api_base_url;
		}
		if other.access_token.is_some() {
			self.access_token = other.access_token;
		}
	}

	pub fn finalize(self) -> IdentityConfig {
		IdentityConfig {
			project_id: self.project_id,
			api_base_url: self
				.api_base_url
				.unwrap_or_else(|| DEFAULT_IDENTITY_API_BASE_URL.to_string()),
			access_token: self.access_token,
		}
	}
}
