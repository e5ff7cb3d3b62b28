// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mawrid_supplier_core::{Supplier, SupplierId};

use crate::error::Result;

/// Document store for supplier records.
///
/// Mutations on a missing id fail with [`DbError::NotFound`](crate::DbError::NotFound).
#[async_trait]
pub trait SupplierStore: Send + Sync {
	async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>>;

	/// Fails with `Conflict` if a document with the same id or uid exists.
	async fn create(&self, supplier: &Supplier) -> Result<()>;

	/// Replace every stored field of an existing document.
	async fn update(&self, supplier: &Supplier) -> Result<()>;

	async fn set_uid(&self, id: &SupplierId, uid: &str) -> Result<()>;

	async fn set_approval(&self, id: &SupplierId, approved_at: DateTime<Utc>) -> Result<()>;

	async fn delete(&self, id: &SupplierId) -> Result<()>;
}
