// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Location of a stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
	/// Object path inside the bucket.
	pub path: String,
	/// Publicly retrievable URL.
	pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
	async fn put(
		&self,
		path: &str,
		bytes: Bytes,
		content_type: &str,
	) -> Result<StoredObject, StorageError>;
}
