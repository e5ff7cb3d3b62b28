// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
	/// No identity matches the given uid or phone number.
	#[error("identity not found: {0}")]
	NotFound(String),

	/// Another identity already owns this phone number.
	#[error("phone number already in use: {0}")]
	PhoneNumberExists(String),

	/// Transport failure (connect, timeout, TLS).
	#[error("identity provider request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// The provider rejected the request.
	#[error("identity provider error: {0}")]
	Provider(String),

	#[error("failed to parse identity provider response: {0}")]
	ParseError(String),
}

impl IdentityError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, IdentityError::NotFound(_))
	}
}
