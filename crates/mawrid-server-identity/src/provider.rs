// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// A user as the identity provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
	pub uid: String,
	pub phone_number: Option<String>,
	pub display_name: Option<String>,
	pub email: Option<String>,
}

/// Attributes for a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
	pub phone_number: String,
	pub display_name: Option<String>,
	pub email: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
	/// Fails with `PhoneNumberExists` if the phone is already registered.
	async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError>;

	async fn update_phone(&self, uid: &str, phone_number: &str)
		-> Result<IdentityUser, IdentityError>;

	async fn delete_user(&self, uid: &str) -> Result<(), IdentityError>;

	/// Fails with `NotFound` when no identity holds the phone number.
	async fn get_user_by_phone(&self, phone_number: &str) -> Result<IdentityUser, IdentityError>;
}
