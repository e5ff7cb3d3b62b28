// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loose E.164 phone validation.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::SupplierError;

static PHONE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Optional `+`, a non-zero leading digit, then 1 to 14 more digits.
pub fn is_valid_phone(phone: &str) -> bool {
	PHONE_REGEX.is_match(phone)
}

pub fn validate_phone(phone: &str) -> Result<(), SupplierError> {
	if is_valid_phone(phone) {
		Ok(())
	} else {
		Err(SupplierError::InvalidPhoneFormat(phone.to_string()))
	}
}
