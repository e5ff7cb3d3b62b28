// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Merge policies applied when an edit request meets a stored record.
//!
//! Scalars follow the *fallback* policy: the submitted value wins only when it
//! is present and non-empty. There is no way to clear a field through an edit;
//! an empty string means "keep what is stored".

/// Fallback policy for optional values.
pub fn fallback(new: Option<String>, existing: Option<String>) -> Option<String> {
	match new {
		Some(value) if !value.is_empty() => Some(value),
		_ => existing,
	}
}

/// Fallback policy for values the record always carries.
pub fn fallback_required(new: Option<String>, existing: &str) -> String {
	match new {
		Some(value) if !value.is_empty() => value,
		_ => existing.to_string(),
	}
}

/// How an edit treats the `otherCitiesServed` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitiesPolicy {
	/// Replace with the submitted list, or with an empty list when none was
	/// submitted. The stored list is never consulted.
	AlwaysOverwrite,
}

impl CitiesPolicy {
	pub fn apply(self, provided: Option<Vec<String>>) -> Vec<String> {
		match self {
			CitiesPolicy::AlwaysOverwrite => provided.unwrap_or_default(),
		}
	}
}

/// Effective contact used when linking a supplier to an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContact {
	pub phone: Option<String>,
	pub name: Option<String>,
	pub email: Option<String>,
}
