// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation errors for supplier input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupplierError {
	/// One or more required fields were absent or empty.
	#[error("missing required fields: {}", .0.join(", "))]
	MissingFields(Vec<&'static str>),

	/// Phone number does not match the loose E.164 pattern.
	#[error("invalid phone number format: {0}")]
	InvalidPhoneFormat(String),
}
