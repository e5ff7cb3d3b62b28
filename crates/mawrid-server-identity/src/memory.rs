// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-local identity provider.
//!
//! Enforces phone uniqueness the same way the hosted provider does, and can be
//! told to fail a specific operation so callers can exercise partial failures.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::IdentityError;
use crate::provider::{IdentityProvider, IdentityUser, NewIdentity};

/// Identity operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityOp {
	Create,
	UpdatePhone,
	Delete,
	Lookup,
}

#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
	users: Mutex<HashMap<String, IdentityUser>>,
	failing: Mutex<HashSet<IdentityOp>>,
}

impl InMemoryIdentityProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every subsequent call of `op` fail with a provider error.
	pub fn fail_on(&self, op: IdentityOp) {
		self.failing.lock().unwrap_or_else(|e| e.into_inner()).insert(op);
	}

	pub fn clear_failures(&self) {
		self.failing.lock().unwrap_or_else(|e| e.into_inner()).clear();
	}

	/// Seed a user directly, bypassing uniqueness checks.
	pub fn insert(&self, user: IdentityUser) {
		self.lock_users().insert(user.uid.clone(), user);
	}

	pub fn get(&self, uid: &str) -> Option<IdentityUser> {
		self.lock_users().get(uid).cloned()
	}

	pub fn users(&self) -> Vec<IdentityUser> {
		let mut users: Vec<_> = self.lock_users().values().cloned().collect();
		users.sort_by(|a, b| a.uid.cmp(&b.uid));
		users
	}

	pub fn len(&self) -> usize {
		self.lock_users().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock_users(&self) -> std::sync::MutexGuard<'_, HashMap<String, IdentityUser>> {
		self.users.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn check(&self, op: IdentityOp) -> Result<(), IdentityError> {
		if self
			.failing
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.contains(&op)
		{
			return Err(IdentityError::Provider(format!("injected {op:?} failure")));
		}
		Ok(())
	}
}

fn phone_taken(users: &HashMap<String, IdentityUser>, phone: &str, except: Option<&str>) -> bool {
	users.values().any(|user| {
		user.phone_number.as_deref() == Some(phone) && Some(user.uid.as_str()) != except
	})
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
	async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError> {
		self.check(IdentityOp::Create)?;
		let mut users = self.lock_users();
		if phone_taken(&users, &user.phone_number, None) {
			return Err(IdentityError::PhoneNumberExists(user.phone_number.clone()));
		}

		let created = IdentityUser {
			uid: Uuid::new_v4().simple().to_string(),
			phone_number: Some(user.phone_number.clone()),
			display_name: user.display_name.clone(),
			email: user.email.clone(),
		};
		users.insert(created.uid.clone(), created.clone());
		Ok(created)
	}

	async fn update_phone(
		&self,
		uid: &str,
		phone_number: &str,
	) -> Result<IdentityUser, IdentityError> {
		self.check(IdentityOp::UpdatePhone)?;
		let mut users = self.lock_users();
		if phone_taken(&users, phone_number, Some(uid)) {
			return Err(IdentityError::PhoneNumberExists(phone_number.to_string()));
		}

		let user = users
			.get_mut(uid)
			.ok_or_else(|| IdentityError::NotFound(uid.to_string()))?;
		user.phone_number = Some(phone_number.to_string());
		Ok(user.clone())
	}

	async fn delete_user(&self, uid: &str) -> Result<(), IdentityError> {
		self.check(IdentityOp::Delete)?;
		self.lock_users()
			.remove(uid)
			.map(|_| ())
			.ok_or_else(|| IdentityError::NotFound(uid.to_string()))
	}

	async fn get_user_by_phone(&self, phone_number: &str) -> Result<IdentityUser, IdentityError> {
		self.check(IdentityOp::Lookup)?;
		self.lock_users()
			.values()
			.find(|user| user.phone_number.as_deref() == Some(phone_number))
			.cloned()
			.ok_or_else(|| IdentityError::NotFound(phone_number.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn new_identity(phone: &str) -> NewIdentity {
		NewIdentity {
			phone_number: phone.to_string(),
			display_name: Some("Ali".to_string()),
			email: None,
		}
	}

	#[tokio::test]
	async fn create_then_lookup_by_phone() {
		let provider = InMemoryIdentityProvider::new();
		let created = provider
			.create_user(&new_identity("+966500000001"))
			.await
			.unwrap();

		let found = provider.get_user_by_phone("+966500000001").await.unwrap();
		assert_eq!(found, created);
		assert_eq!(provider.len(), 1);
	}

	#[tokio::test]
	async fn duplicate_phone_is_rejected() {
		let provider = InMemoryIdentityProvider::new();
		provider
			.create_user(&new_identity("+966500000001"))
			.await
			.unwrap();

		let err = provider
			.create_user(&new_identity("+966500000001"))
			.await
			.unwrap_err();
		assert!(matches!(err, IdentityError::PhoneNumberExists(_)));
		assert_eq!(provider.len(), 1);
	}

	#[tokio::test]
	async fn update_phone_checks_other_users_only() {
		let provider = InMemoryIdentityProvider::new();
		let a = provider
			.create_user(&new_identity("+966500000001"))
			.await
			.unwrap();
		provider
			.create_user(&new_identity("+966500000002"))
			.await
			.unwrap();

		// Re-linking to its own phone is fine.
		provider.update_phone(&a.uid, "+966500000001").await.unwrap();

		let err = provider
			.update_phone(&a.uid, "+966500000002")
			.await
			.unwrap_err();
		assert!(matches!(err, IdentityError::PhoneNumberExists(_)));
	}

	#[tokio::test]
	async fn update_and_delete_unknown_uid() {
		let provider = InMemoryIdentityProvider::new();
		assert!(provider
			.update_phone("missing", "+966500000001")
			.await
			.unwrap_err()
			.is_not_found());
		assert!(provider.delete_user("missing").await.unwrap_err().is_not_found());
	}

	#[tokio::test]
	async fn lookup_of_unknown_phone_is_not_found() {
		let provider = InMemoryIdentityProvider::new();
		assert!(provider
			.get_user_by_phone("+966500000009")
			.await
			.unwrap_err()
			.is_not_found());
	}

	#[tokio::test]
	async fn injected_failure_blocks_only_that_operation() {
		let provider = InMemoryIdentityProvider::new();
		provider.fail_on(IdentityOp::Delete);

		let created = provider
			.create_user(&new_identity("+966500000001"))
			.await
			.unwrap();
		let err = provider.delete_user(&created.uid).await.unwrap_err();
		assert!(matches!(err, IdentityError::Provider(_)));
		assert_eq!(provider.len(), 1);

		provider.clear_failures();
		provider.delete_user(&created.uid).await.unwrap();
		assert!(provider.is_empty());
	}
}
