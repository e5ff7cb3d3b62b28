// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite implementation of [`SupplierStore`].
//!
//! Timestamps are stored as RFC 3339 text and `other_cities_served` as a JSON
//! array.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteQueryResult;
use sqlx::SqlitePool;
use tracing::instrument;

use mawrid_supplier_core::{Supplier, SupplierId};

use crate::error::{DbError, Result};
use crate::store::SupplierStore;

#[derive(Clone)]
pub struct SqliteSupplierStore {
	pool: SqlitePool,
}

impl SqliteSupplierStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
	id: String,
	uid: String,
	name: String,
	phone: String,
	email: String,
	company_name: String,
	cr_number: String,
	address: Option<String>,
	city: Option<String>,
	region: Option<String>,
	other_cities_served: String,
	delivery_option: Option<String>,
	representative_phone: Option<String>,
	representative_name: Option<String>,
	representative_email: Option<String>,
	logo_url: Option<String>,
	cr_license_url: Option<String>,
	role: String,
	is_approved: i32,
	approved_at: Option<String>,
	created_at: String,
	updated_at: Option<String>,
}

fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::InvalidData(format!("invalid {column}: {e}")))
}

impl TryFrom<SupplierRow> for Supplier {
	type Error = DbError;

	fn try_from(row: SupplierRow) -> Result<Self> {
		Ok(Supplier {
			id: SupplierId::new(row.id),
			uid: row.uid,
			name: row.name,
			phone: row.phone,
			email: row.email,
			company_name: row.company_name,
			cr_number: row.cr_number,
			address: row.address,
			city: row.city,
			region: row.region,
			other_cities_served: serde_json::from_str(&row.other_cities_served)
				.map_err(|e| DbError::InvalidData(format!("invalid other_cities_served: {e}")))?,
			delivery_option: row.delivery_option,
			representative_phone: row.representative_phone,
			representative_name: row.representative_name,
			representative_email: row.representative_email,
			logo_url: row.logo_url,
			cr_license_url: row.cr_license_url,
			role: row.role,
			is_approved: row.is_approved != 0,
			approved_at: row
				.approved_at
				.map(|s| parse_timestamp(&s, "approved_at"))
				.transpose()?,
			created_at: parse_timestamp(&row.created_at, "created_at")?,
			updated_at: row
				.updated_at
				.map(|s| parse_timestamp(&s, "updated_at"))
				.transpose()?,
		})
	}
}

fn require_row(result: SqliteQueryResult, id: &SupplierId) -> Result<()> {
	if result.rows_affected() == 0 {
		return Err(DbError::NotFound(format!("supplier {id}")));
	}
	Ok(())
}

fn map_unique_violation(err: sqlx::Error, id: &SupplierId) -> DbError {
	match err.as_database_error() {
		Some(db_err) if db_err.is_unique_violation() => {
			DbError::Conflict(format!("supplier {id} already exists"))
		}
		_ => DbError::Sqlx(err),
	}
}

#[async_trait]
impl SupplierStore for SqliteSupplierStore {
	#[instrument(skip(self), fields(supplier_id = %id))]
	async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>> {
		let row = sqlx::query_as::<_, SupplierRow>(
			r#"
			SELECT id, uid, name, phone, email, company_name, cr_number,
				   address, city, region, other_cities_served, delivery_option,
				   representative_phone, representative_name, representative_email,
				   logo_url, cr_license_url,
				   role, is_approved, approved_at,
				   created_at, updated_at
			FROM supplier_documents
			WHERE id = ?
			"#,
		)
		.bind(id.as_str())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	#[instrument(skip(self, supplier), fields(supplier_id = %supplier.id))]
	async fn create(&self, supplier: &Supplier) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO supplier_documents (
				id, uid, name, phone, email, company_name, cr_number,
				address, city, region, other_cities_served, delivery_option,
				representative_phone, representative_name, representative_email,
				logo_url, cr_license_url,
				role, is_approved, approved_at,
				created_at, updated_at
			)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(supplier.id.as_str())
		.bind(&supplier.uid)
		.bind(&supplier.name)
		.bind(&supplier.phone)
		.bind(&supplier.email)
		.bind(&supplier.company_name)
		.bind(&supplier.cr_number)
		.bind(&supplier.address)
		.bind(&supplier.city)
		.bind(&supplier.region)
		.bind(serde_json::to_string(&supplier.other_cities_served)?)
		.bind(&supplier.delivery_option)
		.bind(&supplier.representative_phone)
		.bind(&supplier.representative_name)
		.bind(&supplier.representative_email)
		.bind(&supplier.logo_url)
		.bind(&supplier.cr_license_url)
		.bind(&supplier.role)
		.bind(if supplier.is_approved { 1 } else { 0 })
		.bind(supplier.approved_at.map(|dt| dt.to_rfc3339()))
		.bind(supplier.created_at.to_rfc3339())
		.bind(supplier.updated_at.map(|dt| dt.to_rfc3339()))
		.execute(&self.pool)
		.await
		.map_err(|e| map_unique_violation(e, &supplier.id))?;

		Ok(())
	}

	#[instrument(skip(self, supplier), fields(supplier_id = %supplier.id))]
	async fn update(&self, supplier: &Supplier) -> Result<()> {
		let result = sqlx::query(
			r#"
			UPDATE supplier_documents SET
				uid = ?,
				name = ?,
				phone = ?,
				email = ?,
				company_name = ?,
				cr_number = ?,
				address = ?,
				city = ?,
				region = ?,
				other_cities_served = ?,
				delivery_option = ?,
				representative_phone = ?,
				representative_name = ?,
				representative_email = ?,
				logo_url = ?,
				cr_license_url = ?,
				role = ?,
				is_approved = ?,
				approved_at = ?,
				created_at = ?,
				updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&supplier.uid)
		.bind(&supplier.name)
		.bind(&supplier.phone)
		.bind(&supplier.email)
		.bind(&supplier.company_name)
		.bind(&supplier.cr_number)
		.bind(&supplier.address)
		.bind(&supplier.city)
		.bind(&supplier.region)
		.bind(serde_json::to_string(&supplier.other_cities_served)?)
		.bind(&supplier.delivery_option)
		.bind(&supplier.representative_phone)
		.bind(&supplier.representative_name)
		.bind(&supplier.representative_email)
		.bind(&supplier.logo_url)
		.bind(&supplier.cr_license_url)
		.bind(&supplier.role)
		.bind(if supplier.is_approved { 1 } else { 0 })
		.bind(supplier.approved_at.map(|dt| dt.to_rfc3339()))
		.bind(supplier.created_at.to_rfc3339())
		.bind(supplier.updated_at.map(|dt| dt.to_rfc3339()))
		.bind(supplier.id.as_str())
		.execute(&self.pool)
		.await
		.map_err(|e| map_unique_violation(e, &supplier.id))?;

		require_row(result, &supplier.id)
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	async fn set_uid(&self, id: &SupplierId, uid: &str) -> Result<()> {
		let result = sqlx::query("UPDATE supplier_documents SET uid = ? WHERE id = ?")
			.bind(uid)
			.bind(id.as_str())
			.execute(&self.pool)
			.await
			.map_err(|e| map_unique_violation(e, id))?;

		require_row(result, id)
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	async fn set_approval(&self, id: &SupplierId, approved_at: DateTime<Utc>) -> Result<()> {
		let result = sqlx::query(
			"UPDATE supplier_documents SET is_approved = 1, approved_at = ? WHERE id = ?",
		)
		.bind(approved_at.to_rfc3339())
		.bind(id.as_str())
		.execute(&self.pool)
		.await?;

		require_row(result, id)
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	async fn delete(&self, id: &SupplierId) -> Result<()> {
		let result = sqlx::query("DELETE FROM supplier_documents WHERE id = ?")
			.bind(id.as_str())
			.execute(&self.pool)
			.await?;

		require_row(result, id)
	}
}
