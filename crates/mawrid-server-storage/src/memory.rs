// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::store::{BlobStore, StoredObject};

const DEFAULT_PUBLIC_BASE: &str = "memory://blobs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
	pub bytes: Bytes,
	pub content_type: String,
}

/// Blob store held in process memory, keyed by object path.
#[derive(Debug)]
pub struct InMemoryBlobStore {
	public_base: String,
	blobs: Mutex<BTreeMap<String, StoredBlob>>,
	fail_puts: AtomicBool,
}

impl Default for InMemoryBlobStore {
	fn default() -> Self {
		Self::with_public_base(DEFAULT_PUBLIC_BASE)
	}
}

impl InMemoryBlobStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_public_base(public_base: impl Into<String>) -> Self {
		Self {
			public_base: public_base.into(),
			blobs: Mutex::new(BTreeMap::new()),
			fail_puts: AtomicBool::new(false),
		}
	}

	/// Make subsequent uploads fail until reset with `false`.
	pub fn set_fail_puts(&self, fail: bool) {
		self.fail_puts.store(fail, Ordering::SeqCst);
	}

	pub fn url_for(&self, path: &str) -> String {
		format!("{}/{}", self.public_base.trim_end_matches('/'), path)
	}

	pub fn get(&self, path: &str) -> Option<StoredBlob> {
		self.lock().get(path).cloned()
	}

	/// Stored paths in lexical order.
	pub fn paths(&self) -> Vec<String> {
		self.lock().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, StoredBlob>> {
		self.blobs.lock().unwrap_or_else(|e| e.into_inner())
	}
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
	async fn put(
		&self,
		path: &str,
		bytes: Bytes,
		content_type: &str,
	) -> Result<StoredObject, StorageError> {
		if self.fail_puts.load(Ordering::SeqCst) {
			return Err(StorageError::Provider {
				status: 503,
				message: "injected upload failure".to_string(),
			});
		}

		self.lock().insert(
			path.to_string(),
			StoredBlob {
				bytes,
				content_type: content_type.to_string(),
			},
		);
		Ok(StoredObject {
			path: path.to_string(),
			url: self.url_for(path),
		})
	}
}
