// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The stored supplier record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{RequiredFields, SupplierFields};
use crate::merge::{fallback, fallback_required, AuthContact, CitiesPolicy};

/// Role tag written on every supplier record.
pub const SUPPLIER_ROLE: &str = "supplier";

/// Document key of a supplier record.
///
/// Issued by the identity provider at creation, so it equals the record's
/// initial `uid`. Opaque: no format is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct SupplierId(pub String);

impl SupplierId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for SupplierId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for SupplierId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
	pub id: SupplierId,
	/// Identity provider user id currently linked to this record.
	pub uid: String,

	pub name: String,
	pub phone: String,
	pub email: String,
	pub company_name: String,
	pub cr_number: String,

	pub address: Option<String>,
	pub city: Option<String>,
	pub region: Option<String>,
	#[serde(default)]
	pub other_cities_served: Vec<String>,
	pub delivery_option: Option<String>,

	pub representative_phone: Option<String>,
	pub representative_name: Option<String>,
	pub representative_email: Option<String>,

	pub logo_url: Option<String>,
	pub cr_license_url: Option<String>,

	pub role: String,
	#[serde(default)]
	pub is_approved: bool,
	pub approved_at: Option<DateTime<Utc>>,

	pub created_at: DateTime<Utc>,
	pub updated_at: Option<DateTime<Utc>>,
}

impl Supplier {
	/// Build the record written at the end of a successful create.
	pub fn from_create(
		uid: String,
		required: RequiredFields,
		fields: SupplierFields,
		logo_url: Option<String>,
		cr_license_url: Option<String>,
		now: DateTime<Utc>,
	) -> Self {
		Self {
			id: SupplierId::new(uid.clone()),
			uid,
			name: required.name,
			phone: required.phone,
			email: required.email,
			company_name: required.company_name,
			cr_number: required.cr_number,
			address: fallback(fields.address, None),
			city: fallback(fields.city, None),
			region: fallback(fields.region, None),
			other_cities_served: fields.other_cities_served.unwrap_or_default(),
			delivery_option: fallback(fields.delivery_option, None),
			representative_phone: fallback(fields.representative_phone, None),
			representative_name: fallback(fields.representative_name, None),
			representative_email: fallback(fields.representative_email, None),
			logo_url,
			cr_license_url,
			role: SUPPLIER_ROLE.to_string(),
			is_approved: false,
			approved_at: None,
			created_at: now,
			updated_at: None,
		}
	}

	/// Apply an edit request on top of this record.
	///
	/// Scalars use the fallback policy; `otherCitiesServed` uses
	/// [`CitiesPolicy::AlwaysOverwrite`]. `new_logo_url`/`new_cr_license_url`
	/// are the URLs of files uploaded by this edit, if any. Identity link,
	/// approval state and `createdAt` are carried over untouched.
	pub fn merge_edit(
		&self,
		fields: SupplierFields,
		new_logo_url: Option<String>,
		new_cr_license_url: Option<String>,
		now: DateTime<Utc>,
	) -> Self {
		Self {
			id: self.id.clone(),
			uid: self.uid.clone(),
			name: fallback_required(fields.name, &self.name),
			phone: fallback_required(fields.phone, &self.phone),
			email: fallback_required(fields.email, &self.email),
			company_name: fallback_required(fields.company_name, &self.company_name),
			cr_number: fallback_required(fields.cr_number, &self.cr_number),
			address: fallback(fields.address, self.address.clone()),
			city: fallback(fields.city, self.city.clone()),
			region: fallback(fields.region, self.region.clone()),
			other_cities_served: CitiesPolicy::AlwaysOverwrite.apply(fields.other_cities_served),
			delivery_option: fallback(fields.delivery_option, self.delivery_option.clone()),
			representative_phone: fallback(
				fields.representative_phone,
				self.representative_phone.clone(),
			),
			representative_name: fallback(fields.representative_name, self.representative_name.clone()),
			representative_email: fallback(
				fields.representative_email,
				self.representative_email.clone(),
			),
			logo_url: fallback(new_logo_url, self.logo_url.clone()),
			cr_license_url: fallback(new_cr_license_url, self.cr_license_url.clone()),
			role: self.role.clone(),
			is_approved: self.is_approved,
			approved_at: self.approved_at,
			created_at: self.created_at,
			updated_at: Some(now),
		}
	}

	/// Contact used to (re)create the supplier's identity.
	///
	/// Representative values win over the primary ones when non-empty.
	pub fn auth_contact(&self) -> AuthContact {
		let primary = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());
		AuthContact {
			phone: fallback(self.representative_phone.clone(), primary(&self.phone)),
			name: fallback(self.representative_name.clone(), primary(&self.name)),
			email: fallback(self.representative_email.clone(), primary(&self.email)),
		}
	}
}
