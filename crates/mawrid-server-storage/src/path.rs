// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Object path generation.
//!
//! Layout: `suppliers/{uid}/{slot}/{timestampMillis}-{fileName}`. The
//! millisecond prefix keeps every upload at a fresh path, so an edit never
//! overwrites the blob an earlier record version points at.

use chrono::{DateTime, Utc};
use mawrid_supplier_core::FileSlot;

const FALLBACK_FILE_NAME: &str = "upload";
const MAX_FILE_NAME_LEN: usize = 128;

pub fn object_path(
	uid: &str,
	slot: FileSlot,
	now: DateTime<Utc>,
	file_name: Option<&str>,
) -> String {
	format!(
		"suppliers/{}/{}/{}-{}",
		uid,
		slot.path_segment(),
		now.timestamp_millis(),
		sanitize_file_name(file_name.unwrap_or_default())
	)
}

/// Reduce a client-supplied file name to a single safe path segment.
///
/// Directory components are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
	let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
	let cleaned: String = base
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
				c
			} else {
				'_'
			}
		})
		.take(MAX_FILE_NAME_LEN)
		.collect();

	if cleaned.trim_matches('.').is_empty() {
		FALLBACK_FILE_NAME.to_string()
	} else {
		cleaned
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn now() -> DateTime<Utc> {
		Utc.timestamp_millis_opt(1_740_819_600_123).unwrap()
	}

	#[test]
	fn path_layout() {
		assert_eq!(
			object_path("uid-1", FileSlot::CompanyLogo, now(), Some("logo.png")),
			"suppliers/uid-1/company-logo/1740819600123-logo.png"
		);
		assert_eq!(
			object_path("uid-1", FileSlot::CrLicense, now(), Some("cr.pdf")),
			"suppliers/uid-1/cr-license/1740819600123-cr.pdf"
		);
	}

	#[test]
	fn missing_file_name_uses_fallback() {
		assert_eq!(
			object_path("uid-1", FileSlot::CompanyLogo, now(), None),
			"suppliers/uid-1/company-logo/1740819600123-upload"
		);
	}

	#[test]
	fn sanitize_strips_directories() {
		assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
		assert_eq!(sanitize_file_name("C:\\docs\\cr.pdf"), "cr.pdf");
	}

	#[test]
	fn sanitize_replaces_unsafe_characters() {
		assert_eq!(sanitize_file_name("my logo (1).png"), "my_logo__1_.png");
		assert_eq!(sanitize_file_name("شعار.png"), "____.png");
	}

	#[test]
	fn sanitize_rejects_dot_only_names() {
		assert_eq!(sanitize_file_name(".."), "upload");
		assert_eq!(sanitize_file_name(""), "upload");
		assert_eq!(sanitize_file_name("dir/"), "upload");
	}

	#[test]
	fn sanitize_caps_length() {
		let long = "a".repeat(500);
		assert_eq!(sanitize_file_name(&long).len(), MAX_FILE_NAME_LEN);
	}
}
