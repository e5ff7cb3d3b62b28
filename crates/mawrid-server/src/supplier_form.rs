// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Multipart decoding for supplier create/edit requests.
//!
//! Text parts are matched by their camelCase attribute name. `companyLogo` and
//! `crLicense` parts that carry a filename are buffered as uploads. `otherCitiesServed` may be sent as
//! repeated parts or as a single JSON array.

use axum::extract::Multipart;
use mawrid_supplier_core::{FileSlot, SupplierFields, SupplierUploads, UploadedFile};

use crate::error::ServerError;

pub const CITIES_FIELD: &str = "otherCitiesServed";

/// A decoded supplier form.
#[derive(Debug, Default)]
pub struct SupplierForm {
	pub fields: SupplierFields,
	pub uploads: SupplierUploads,
}

impl SupplierForm {
	pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ServerError> {
		let mut form = SupplierForm::default();

		while let Some(field) = multipart.next_field().await? {
			let Some(name) = field.name().map(str::to_string) else {
				continue;
			};

			// Only parts with a filename are uploads. Text under a slot name is ignored.
			let slot = FileSlot::from_field_name(&name);
			if let (Some(slot), Some(file_name)) = (slot, field.file_name().map(str::to_string)) {
				let file_name = Some(file_name);
				let content_type = field.content_type().map(str::to_string);
				let bytes = field.bytes().await?;
				// Browsers send an empty part for an untouched file input.
				if bytes.is_empty() {
					continue;
				}
				form.uploads.set(
					slot,
					UploadedFile {
						file_name,
						content_type,
						bytes,
					},
				);
				continue;
			}

			let value = field.text().await?;
			form.apply_text(&name, value);
		}

		Ok(form)
	}

	fn apply_text(&mut self, name: &str, value: String) {
		if name == CITIES_FIELD {
			self.fields.push_cities(parse_cities(value));
		} else if !self.fields.set(name, value) {
			tracing::debug!(field = name, "ignoring unknown supplier form field");
		}
	}
}

/// Split one `otherCitiesServed` part into cities.
///
/// A JSON array contributes each element; anything else is a single city.
pub fn parse_cities(value: String) -> Vec<String> {
	let trimmed = value.trim();
	if trimmed.starts_with('[') {
		if let Ok(cities) = serde_json::from_str::<Vec<String>>(trimmed) {
			return cities;
		}
	}
	vec![value]
}
