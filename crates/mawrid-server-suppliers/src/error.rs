// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use mawrid_server_db::DbError;
use mawrid_server_identity::IdentityError;
use mawrid_server_storage::StorageError;
use mawrid_supplier_core::{SupplierError, SupplierId};
use thiserror::Error;

use crate::ledger::EffectLedger;

#[derive(Debug, Error)]
pub enum WorkflowError {
	#[error("missing required fields: {}", .0.join(", "))]
	InvalidInput(Vec<&'static str>),

	#[error("invalid phone number format: {0}")]
	InvalidPhoneFormat(String),

	#[error("supplier {0} has no phone number to authenticate with")]
	MissingPhone(SupplierId),

	/// The phone belongs to a different identity.
	#[error("phone number {0} is already in use by another account")]
	PhoneInUse(String),

	#[error("supplier not found: {0}")]
	NotFound(SupplierId),

	#[error("failed to create identity: {0}")]
	IdentityCreate(#[source] IdentityError),

	#[error("failed to update identity: {0}")]
	IdentityUpdate(#[source] IdentityError),

	#[error("failed to delete identity: {0}")]
	IdentityDelete(#[source] IdentityError),

	#[error("failed to look up identity: {0}")]
	IdentityLookup(#[source] IdentityError),

	#[error("failed to store file: {0}")]
	Storage(#[source] StorageError),

	#[error("document store error: {0}")]
	Document(#[source] DbError),
}

impl From<SupplierError> for WorkflowError {
	fn from(err: SupplierError) -> Self {
		match err {
			SupplierError::MissingFields(fields) => WorkflowError::InvalidInput(fields),
			SupplierError::InvalidPhoneFormat(phone) => WorkflowError::InvalidPhoneFormat(phone),
		}
	}
}

/// A failed workflow run: the error plus everything done before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct WorkflowFailure {
	#[source]
	pub error: WorkflowError,
	pub ledger: EffectLedger,
}

impl WorkflowFailure {
	pub fn new(error: WorkflowError, ledger: EffectLedger) -> Self {
		Self { error, ledger }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_are_listed() {
		let err: WorkflowError = SupplierError::MissingFields(vec!["name", "crNumber"]).into();
		assert_eq!(err.to_string(), "missing required fields: name, crNumber");
	}

	#[test]
	fn store_errors_keep_their_source() {
		use std::error::Error as _;

		let err = WorkflowError::Document(DbError::Internal("disk full".to_string()));
		assert!(err.source().is_some());
		assert!(err.to_string().contains("disk full"));
	}

	#[test]
	fn provider_message_is_passed_through() {
		let err = WorkflowError::IdentityDelete(IdentityError::Provider(
			"PERMISSION_DENIED".to_string(),
		));
		assert!(err.to_string().contains("PERMISSION_DENIED"));
	}
}
