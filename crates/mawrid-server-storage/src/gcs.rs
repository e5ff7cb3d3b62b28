// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Cloud Storage JSON API client.
//!
//! Objects are written with a single-request media upload:
//! `POST {api_base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={path}`.
//! The returned URL is `{public_base}/{bucket}/{path}`; the bucket is expected
//! to grant public read on supplier uploads.

use async_trait::async_trait;
use bytes::Bytes;
use mawrid_common_config::SecretString;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::StorageError;
use crate::store::{BlobStore, StoredObject};

pub const DEFAULT_API_BASE_URL: &str = "https://storage.googleapis.com";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GcsConfig {
	pub api_base_url: String,
	pub public_base_url: String,
	pub bucket: String,
	pub access_token: SecretString,
	pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ObjectResource {
	name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: String,
}

#[derive(Debug, Clone)]
pub struct GcsBlobStore {
	config: GcsConfig,
	http_client: reqwest::Client,
}

impl GcsBlobStore {
	pub fn new(config: GcsConfig) -> Result<Self, StorageError> {
		// Fail at startup rather than on the first upload.
		Url::parse(&config.api_base_url)?;
		Url::parse(&config.public_base_url)?;

		let http_client = mawrid_common_http::new_client_with_timeout(config.timeout)?;
		Ok(Self {
			config,
			http_client,
		})
	}

	fn upload_url(&self, path: &str) -> Result<Url, StorageError> {
		let mut url = Url::parse(&self.config.api_base_url)?;
		url.path_segments_mut()
			.map_err(|_| StorageError::InvalidUrl(self.config.api_base_url.clone()))?
			.pop_if_empty()
			.extend(["upload", "storage", "v1", "b", &self.config.bucket, "o"]);
		url.query_pairs_mut()
			.append_pair("uploadType", "media")
			.append_pair("name", path);
		Ok(url)
	}

	/// Public URL for an object path, one URL segment per path segment.
	pub fn public_url(&self, path: &str) -> Result<String, StorageError> {
		let mut url = Url::parse(&self.config.public_base_url)?;
		url.path_segments_mut()
			.map_err(|_| StorageError::InvalidUrl(self.config.public_base_url.clone()))?
			.pop_if_empty()
			.push(&self.config.bucket)
			.extend(path.split('/'));
		Ok(url.into())
	}
}

fn provider_error(status: reqwest::StatusCode, body: &str) -> StorageError {
	let message = serde_json::from_str::<ErrorEnvelope>(body)
		.map(|envelope| envelope.error.message)
		.unwrap_or_else(|_| body.to_string());
	StorageError::Provider {
		status: status.as_u16(),
		message,
	}
}

#[async_trait]
impl BlobStore for GcsBlobStore {
	#[tracing::instrument(skip(self, bytes), fields(size = bytes.len()), name = "GcsBlobStore::put")]
	async fn put(
		&self,
		path: &str,
		bytes: Bytes,
		content_type: &str,
	) -> Result<StoredObject, StorageError> {
		let response = self
			.http_client
			.post(self.upload_url(path)?)
			.bearer_auth(self.config.access_token.expose())
			.header(CONTENT_TYPE, content_type)
			.body(bytes)
			.send()
			.await?;

		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			tracing::debug!(%status, "storage upload rejected");
			return Err(provider_error(status, &text));
		}

		let object: ObjectResource = serde_json::from_str(&text)
			.map_err(|e| StorageError::ParseError(e.to_string()))?;

		Ok(StoredObject {
			url: self.public_url(&object.name)?,
			path: object.name,
		})
	}
}
