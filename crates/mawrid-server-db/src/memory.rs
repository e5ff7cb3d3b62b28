// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use mawrid_supplier_core::{Supplier, SupplierId};

use crate::error::{DbError, Result};
use crate::store::SupplierStore;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
	Get,
	Create,
	Update,
	SetUid,
	SetApproval,
	Delete,
}

#[derive(Debug, Default)]
pub struct InMemorySupplierStore {
	documents: Mutex<BTreeMap<SupplierId, Supplier>>,
	failing: Mutex<HashSet<StoreOp>>,
}

impl InMemorySupplierStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_on(&self, op: StoreOp) {
		self.failing.lock().unwrap_or_else(|e| e.into_inner()).insert(op);
	}

	pub fn clear_failures(&self) {
		self.failing.lock().unwrap_or_else(|e| e.into_inner()).clear();
	}

	/// Seed a document directly.
	pub fn insert(&self, supplier: Supplier) {
		self.lock().insert(supplier.id.clone(), supplier);
	}

	pub fn snapshot(&self, id: &SupplierId) -> Option<Supplier> {
		self.lock().get(id).cloned()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<SupplierId, Supplier>> {
		self.documents.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn check(&self, op: StoreOp) -> Result<()> {
		if self
			.failing
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.contains(&op)
		{
			return Err(DbError::Internal(format!("injected {op:?} failure")));
		}
		Ok(())
	}

	fn modify<F>(&self, id: &SupplierId, f: F) -> Result<()>
	where
		F: FnOnce(&mut Supplier),
	{
		let mut documents = self.lock();
		let supplier = documents
			.get_mut(id)
			.ok_or_else(|| DbError::NotFound(format!("supplier {id}")))?;
		f(supplier);
		Ok(())
	}
}

#[async_trait]
impl SupplierStore for InMemorySupplierStore {
	async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>> {
		self.check(StoreOp::Get)?;
		Ok(self.snapshot(id))
	}

	async fn create(&self, supplier: &Supplier) -> Result<()> {
		self.check(StoreOp::Create)?;
		let mut documents = self.lock();
		if documents.contains_key(&supplier.id) || documents.values().any(|s| s.uid == supplier.uid)
		{
			return Err(DbError::Conflict(format!(
				"supplier {} already exists",
				supplier.id
			)));
		}
		documents.insert(supplier.id.clone(), supplier.clone());
		Ok(())
	}

	async fn update(&self, supplier: &Supplier) -> Result<()> {
		self.check(StoreOp::Update)?;
		self.modify(&supplier.id, |stored| *stored = supplier.clone())
	}

	async fn set_uid(&self, id: &SupplierId, uid: &str) -> Result<()> {
		self.check(StoreOp::SetUid)?;
		self.modify(id, |stored| stored.uid = uid.to_string())
	}

	async fn set_approval(&self, id: &SupplierId, approved_at: DateTime<Utc>) -> Result<()> {
		self.check(StoreOp::SetApproval)?;
		self.modify(id, |stored| {
			stored.is_approved = true;
			stored.approved_at = Some(approved_at);
		})
	}

	async fn delete(&self, id: &SupplierId) -> Result<()> {
		self.check(StoreOp::Delete)?;
		self.lock()
			.remove(id)
			.map(|_| ())
			.ok_or_else(|| DbError::NotFound(format!("supplier {id}")))
	}
}
