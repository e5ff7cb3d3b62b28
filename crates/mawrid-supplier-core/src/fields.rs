// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request contract for creating and editing suppliers.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SupplierError;

/// Field values submitted with a create or edit request.
///
/// Every scalar is optional at this level; `require` enforces the create-time
/// rules. An empty string is treated the same as an absent value everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SupplierFields {
	pub name: Option<String>,
	pub phone: Option<String>,
	pub email: Option<String>,
	pub company_name: Option<String>,
	pub cr_number: Option<String>,
	pub address: Option<String>,
	pub city: Option<String>,
	pub region: Option<String>,
	pub other_cities_served: Option<Vec<String>>,
	pub delivery_option: Option<String>,
	pub representative_phone: Option<String>,
	pub representative_name: Option<String>,
	pub representative_email: Option<String>,
}

/// Required create-time values, all guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
	pub name: String,
	pub phone: String,
	pub email: String,
	pub company_name: String,
	pub cr_number: String,
}

impl SupplierFields {
	/// Assign a scalar field by its wire name. Returns `false` for unknown names.
	///
	/// `otherCitiesServed` is not a scalar; use [`SupplierFields::push_cities`].
	pub fn set(&mut self, name: &str, value: String) -> bool {
		let slot = match name {
			"name" => &mut self.name,
			"phone" => &mut self.phone,
			"email" => &mut self.email,
			"companyName" => &mut self.company_name,
			"crNumber" => &mut self.cr_number,
			"address" => &mut self.address,
			"city" => &mut self.city,
			"region" => &mut self.region,
			"deliveryOption" => &mut self.delivery_option,
			"representativePhone" => &mut self.representative_phone,
			"representativeName" => &mut self.representative_name,
			"representativeEmail" => &mut self.representative_email,
			_ => return false,
		};
		*slot = Some(value);
		true
	}

	/// Append cities to the submitted list, creating it on first use.
	pub fn push_cities<I>(&mut self, cities: I)
	where
		I: IntoIterator<Item = String>,
	{
		self
			.other_cities_served
			.get_or_insert_with(Vec::new)
			.extend(cities.into_iter().filter(|c| !c.is_empty()));
	}

	/// The submitted phone, if any non-empty value was provided.
	pub fn provided_phone(&self) -> Option<&str> {
		provided(&self.phone)
	}

	/// Check that every create-time field is present and non-empty.
	///
	/// All missing names are collected so the client sees them in one response.
	pub fn require(&self) -> Result<RequiredFields, SupplierError> {
		let mut missing = Vec::new();
		let mut take = |value: &Option<String>, wire: &'static str| match provided(value) {
			Some(v) => v.to_string(),
			None => {
				missing.push(wire);
				String::new()
			}
		};

		let required = RequiredFields {
			name: take(&self.name, "name"),
			phone: take(&self.phone, "phone"),
			email: take(&self.email, "email"),
			company_name: take(&self.company_name, "companyName"),
			cr_number: take(&self.cr_number, "crNumber"),
		};

		if missing.is_empty() {
			Ok(required)
		} else {
			Err(SupplierError::MissingFields(missing))
		}
	}
}

fn provided(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}

/// The two named upload slots a supplier form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSlot {
	CompanyLogo,
	CrLicense,
}

impl FileSlot {
	pub const ALL: [FileSlot; 2] = [FileSlot::CompanyLogo, FileSlot::CrLicense];

	/// Multipart part name.
	pub fn field_name(self) -> &'static str {
		match self {
			FileSlot::CompanyLogo => "companyLogo",
			FileSlot::CrLicense => "crLicense",
		}
	}

	/// Path segment used under the supplier's storage prefix.
	pub fn path_segment(self) -> &'static str {
		match self {
			FileSlot::CompanyLogo => "company-logo",
			FileSlot::CrLicense => "cr-license",
		}
	}

	pub fn from_field_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|slot| slot.field_name() == name)
	}
}

impl std::fmt::Display for FileSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.field_name())
	}
}

/// A file received from the client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
	pub file_name: Option<String>,
	pub content_type: Option<String>,
	pub bytes: Bytes,
}

impl UploadedFile {
	pub fn content_type_or_default(&self) -> &str {
		self
			.content_type
			.as_deref()
			.unwrap_or("application/octet-stream")
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierUploads {
	pub company_logo: Option<UploadedFile>,
	pub cr_license: Option<UploadedFile>,
}

impl SupplierUploads {
	pub fn set(&mut self, slot: FileSlot, file: UploadedFile) {
		match slot {
			FileSlot::CompanyLogo => self.company_logo = Some(file),
			FileSlot::CrLicense => self.cr_license = Some(file),
		}
	}

	pub fn get(&self, slot: FileSlot) -> Option<&UploadedFile> {
		match slot {
			FileSlot::CompanyLogo => self.company_logo.as_ref(),
			FileSlot::CrLicense => self.cr_license.as_ref(),
		}
	}

	/// Provided files in slot order (logo first, then license).
	pub fn iter(&self) -> impl Iterator<Item = (FileSlot, &UploadedFile)> {
		FileSlot::ALL
			.into_iter()
			.filter_map(|slot| self.get(slot).map(|file| (slot, file)))
	}

	pub fn is_empty(&self) -> bool {
		self.company_logo.is_none() && self.cr_license.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn complete_fields() -> SupplierFields {
		SupplierFields {
			name: Some("Ali".to_string()),
			phone: Some("+966500000000".to_string()),
			email: Some("a@x.com".to_string()),
			company_name: Some("Acme".to_string()),
			cr_number: Some("123".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn require_passes_with_all_required_fields() {
		let required = complete_fields().require().unwrap();
		assert_eq!(required.name, "Ali");
		assert_eq!(required.company_name, "Acme");
		assert_eq!(required.cr_number, "123");
	}

	#[test]
	fn require_lists_every_missing_field() {
		let fields = SupplierFields {
			name: Some("Ali".to_string()),
			email: Some(String::new()),
			..Default::default()
		};

		assert_eq!(
			fields.require(),
			Err(SupplierError::MissingFields(vec![
				"phone",
				"email",
				"companyName",
				"crNumber"
			]))
		);
	}

	#[test]
	fn set_maps_wire_names() {
		let mut fields = SupplierFields::default();
		assert!(fields.set("companyName", "Acme".to_string()));
		assert!(fields.set("representativeEmail", "rep@x.com".to_string()));
		assert!(!fields.set("isApproved", "true".to_string()));

		assert_eq!(fields.company_name.as_deref(), Some("Acme"));
		assert_eq!(fields.representative_email.as_deref(), Some("rep@x.com"));
	}

	#[test]
	fn push_cities_accumulates_and_skips_blanks() {
		let mut fields = SupplierFields::default();
		fields.push_cities(["Riyadh".to_string()]);
		fields.push_cities(["".to_string(), "Jeddah".to_string()]);

		assert_eq!(
			fields.other_cities_served,
			Some(vec!["Riyadh".to_string(), "Jeddah".to_string()])
		);
	}

	#[test]
	fn file_slot_names_roundtrip() {
		for slot in FileSlot::ALL {
			assert_eq!(FileSlot::from_field_name(slot.field_name()), Some(slot));
		}
		assert_eq!(FileSlot::from_field_name("avatar"), None);
	}

	#[test]
	fn uploads_iterate_in_slot_order() {
		let file = |name: &str| UploadedFile {
			file_name: Some(name.to_string()),
			content_type: None,
			bytes: Bytes::from_static(b"data"),
		};
		let mut uploads = SupplierUploads::default();
		uploads.set(FileSlot::CrLicense, file("license.pdf"));
		uploads.set(FileSlot::CompanyLogo, file("logo.png"));

		let slots: Vec<FileSlot> = uploads.iter().map(|(slot, _)| slot).collect();
		assert_eq!(slots, vec![FileSlot::CompanyLogo, FileSlot::CrLicense]);
		assert_eq!(
			uploads.get(FileSlot::CrLicense).unwrap().content_type_or_default(),
			"application/octet-stream"
		);
	}
}
