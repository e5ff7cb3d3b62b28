// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
	#[error("storage request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// The storage service answered with a non-success status.
	#[error("storage error ({status}): {message}")]
	Provider { status: u16, message: String },

	#[error("invalid storage url: {0}")]
	InvalidUrl(String),

	#[error("failed to parse storage response: {0}")]
	ParseError(String),
}

impl From<url::ParseError> for StorageError {
	fn from(err: url::ParseError) -> Self {
		StorageError::InvalidUrl(err.to_string())
	}
}
