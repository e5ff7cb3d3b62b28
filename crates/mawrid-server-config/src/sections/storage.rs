// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blob storage (Google Cloud Storage) configuration.

use mawrid_common_config::SecretString;
use serde::Deserialize;

pub const DEFAULT_STORAGE_API_BASE_URL: &str = "https://storage.googleapis.com";
pub const DEFAULT_STORAGE_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

#[derive(Debug, Clone)]
pub struct StorageConfig {
	pub bucket: Option<String>,
	pub api_base_url: String,
	/// Prefix of the URLs written into supplier records.
	pub public_base_url: String,
	pub access_token: Option<SecretString>,
}

impl Default for StorageConfig {
	fn default() -> Self {
		StorageConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfigLayer {
	#[serde(default)]
	pub bucket: Option<String>,
	#[serde(default)]
	pub api_base_url: Option<String>,
	#[serde(default)]
	pub public_base_url: Option<String>,
	#[serde(skip)]
	pub access_token: Option<SecretString>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: StorageConfigLayer) {
		if other.bucket.is_some() {
			self.bucket = other.bucket;
		}
		if other.api_base_url.is_some() {
			self.api_base_url = other.api_base_url;
		}
		if other.public_base_url.is_some() {
			self.public_base_url = other.public_base_url;
		}
		if other.access_token.is_some() {
			self.access_token = other.access_token;
		}
	}

	pub fn finalize(self) -> StorageConfig {
		StorageConfig {
			bucket: self.bucket,
			api_base_url: self
				.api_base_url
				.unwrap_or_else(|| DEFAULT_STORAGE_API_BASE_URL.to_string()),
			public_base_url: self
				.public_base_url
				.unwrap_or_else(|| DEFAULT_STORAGE_PUBLIC_BASE_URL.to_string()),
			access_token: self.access_token,
		}
	}
}
