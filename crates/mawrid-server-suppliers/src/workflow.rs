// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use mawrid_server_db::SupplierStore;
use mawrid_server_identity::{IdentityError, IdentityProvider, NewIdentity};
use mawrid_server_storage::{object_path, BlobStore};
use mawrid_supplier_core::{validate_phone, FileSlot, Supplier, SupplierFields, SupplierId, SupplierUploads};

use crate::clock::{Clock, SystemClock};
use crate::error::{WorkflowError, WorkflowFailure};
use crate::ledger::{Effect, EffectLedger, Operation, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
	pub id: SupplierId,
	pub supplier: Supplier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateOutcome {
	/// An identity already holds the supplier's phone; nothing was changed.
	AlreadyAuthenticated { uid: String },
	/// A new identity was created and linked to the record.
	Created { uid: String },
}

/// Orchestrates supplier operations across the three collaborators.
pub struct SupplierWorkflow {
	identity: Arc<dyn IdentityProvider>,
	blobs: Arc<dyn BlobStore>,
	store: Arc<dyn SupplierStore>,
	clock: Arc<dyn Clock>,
}

impl SupplierWorkflow {
	pub fn new(
		identity: Arc<dyn IdentityProvider>,
		blobs: Arc<dyn BlobStore>,
		store: Arc<dyn SupplierStore>,
	) -> Self {
		Self {
			identity,
			blobs,
			store,
			clock: Arc::new(SystemClock),
		}
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	pub async fn get(&self, id: &SupplierId) -> Result<Supplier, WorkflowFailure> {
		let mut ledger = EffectLedger::for_supplier(Operation::Get, id);
		let result = self.load(&mut ledger, id).await;
		finish(ledger, result)
	}

	#[instrument(skip(self, fields, uploads))]
	pub async fn create(
		&self,
		fields: SupplierFields,
		uploads: SupplierUploads,
	) -> Result<CreateOutcome, WorkflowFailure> {
		let mut ledger = EffectLedger::new(Operation::Create);
		let result = self.run_create(&mut ledger, fields, uploads).await;
		finish(ledger, result)
	}

	#[instrument(skip(self, fields, uploads), fields(supplier_id = %id))]
	pub async fn edit(
		&self,
		id: &SupplierId,
		fields: SupplierFields,
		uploads: SupplierUploads,
	) -> Result<Supplier, WorkflowFailure> {
		let mut ledger = EffectLedger::for_supplier(Operation::Edit, id);
		let result = self.run_edit(&mut ledger, id, fields, uploads).await;
		finish(ledger, result)
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	pub async fn delete(&self, id: &SupplierId) -> Result<(), WorkflowFailure> {
		let mut ledger = EffectLedger::for_supplier(Operation::Delete, id);
		let result = self.run_delete(&mut ledger, id).await;
		finish(ledger, result)
	}

	/// Returns the approval timestamp written.
	#[instrument(skip(self), fields(supplier_id = %id))]
	pub async fn approve(&self, id: &SupplierId) -> Result<DateTime<Utc>, WorkflowFailure> {
		let mut ledger = EffectLedger::for_supplier(Operation::Approve, id);
		let result = self.run_approve(&mut ledger, id).await;
		finish(ledger, result)
	}

	#[instrument(skip(self), fields(supplier_id = %id))]
	pub async fn authenticate(
		&self,
		id: &SupplierId,
	) -> Result<AuthenticateOutcome, WorkflowFailure> {
		let mut ledger = EffectLedger::for_supplier(Operation::Authenticate, id);
		let result = self.run_authenticate(&mut ledger, id).await;
		finish(ledger, result)
	}

	// =========================================================================
	// Steps
	// =========================================================================

	async fn load(
		&self,
		ledger: &mut EffectLedger,
		id: &SupplierId,
	) -> Result<Supplier, WorkflowError> {
		match self.store.get(id).await {
			Ok(Some(supplier)) => {
				ledger.succeeded(Step::LoadDocument);
				Ok(supplier)
			}
			Ok(None) => Err(fail(
				ledger,
				Step::LoadDocument,
				WorkflowError::NotFound(id.clone()),
			)),
			Err(e) => Err(fail(ledger, Step::LoadDocument, WorkflowError::Document(e))),
		}
	}

	/// Upload every provided file to a fresh path under `uid`.
	///
	/// Returns the new `(logoUrl, crLicenseUrl)`; `None` where no file was sent.
	async fn upload_files(
		&self,
		ledger: &mut EffectLedger,
		uid: &str,
		uploads: &SupplierUploads,
	) -> Result<(Option<String>, Option<String>), WorkflowError> {
		let mut logo_url = None;
		let mut cr_license_url = None;

		for (slot, file) in uploads.iter() {
			let path = object_path(uid, slot, self.clock.now(), file.file_name.as_deref());
			let stored = self
				.blobs
				.put(&path, file.bytes.clone(), file.content_type_or_default())
				.await
				.map_err(|e| fail(ledger, Step::upload(slot), WorkflowError::Storage(e)))?;

			tracing::debug!(%slot, path = %stored.path, "file stored");
			match slot {
				FileSlot::CompanyLogo => logo_url = Some(stored.url.clone()),
				FileSlot::CrLicense => cr_license_url = Some(stored.url.clone()),
			}
			ledger.effect(
				Step::upload(slot),
				Effect::BlobStored {
					path: stored.path,
					url: stored.url,
				},
			);
		}

		Ok((logo_url, cr_license_url))
	}

	async fn run_create(
		&self,
		ledger: &mut EffectLedger,
		fields: SupplierFields,
		uploads: SupplierUploads,
	) -> Result<CreateOutcome, WorkflowError> {
		let required = fields
			.require()
			.and_then(|required| validate_phone(&required.phone).map(|()| required))
			.map_err(|e| fail(ledger, Step::ValidateInput, e.into()))?;
		ledger.succeeded(Step::ValidateInput);

		let identity = self
			.identity
			.create_user(&NewIdentity {
				phone_number: required.phone.clone(),
				display_name: Some(required.name.clone()),
				email: None,
			})
			.await
			.map_err(|e| fail(ledger, Step::CreateIdentity, WorkflowError::IdentityCreate(e)))?;
		let uid = identity.uid;
		ledger.set_supplier_id(SupplierId::new(uid.clone()));
		ledger.effect(
			Step::CreateIdentity,
			Effect::IdentityCreated { uid: uid.clone() },
		);

		let (logo_url, cr_license_url) = self.upload_files(ledger, &uid, &uploads).await?;

		let supplier = Supplier::from_create(
			uid,
			required,
			fields,
			logo_url,
			cr_license_url,
			self.clock.now(),
		);
		self.store
			.create(&supplier)
			.await
			.map_err(|e| fail(ledger, Step::WriteDocument, WorkflowError::Document(e)))?;
		ledger.effect(
			Step::WriteDocument,
			Effect::DocumentWritten {
				id: supplier.id.clone(),
			},
		);

		tracing::info!(supplier_id = %supplier.id, "supplier created");
		Ok(CreateOutcome {
			id: supplier.id.clone(),
			supplier,
		})
	}

	async fn run_edit(
		&self,
		ledger: &mut EffectLedger,
		id: &SupplierId,
		fields: SupplierFields,
		uploads: SupplierUploads,
	) -> Result<Supplier, WorkflowError> {
		let existing = self.load(ledger, id).await?;

		if let Some(phone) = fields.provided_phone() {
			validate_phone(phone).map_err(|e| fail(ledger, Step::ValidateInput, e.into()))?;
			ledger.succeeded(Step::ValidateInput);
			self.relink_phone(ledger, &existing.uid, phone).await?;
		}

		let (logo_url, cr_license_url) =
			self.upload_files(ledger, &existing.uid, &uploads).await?;

		let merged = existing.merge_edit(fields, logo_url, cr_license_url, self.clock.now());
		self.store
			.update(&merged)
			.await
			.map_err(|e| fail(ledger, Step::WriteDocument, WorkflowError::Document(e)))?;
		ledger.effect(
			Step::WriteDocument,
			Effect::DocumentWritten { id: id.clone() },
		);

		tracing::info!("supplier updated");
		Ok(merged)
	}

	/// Point the identity `uid` at `phone`, unless another identity owns it.
	async fn relink_phone(
		&self,
		ledger: &mut EffectLedger,
		uid: &str,
		phone: &str,
	) -> Result<(), WorkflowError> {
		match self.identity.get_user_by_phone(phone).await {
			Ok(owner) if owner.uid != uid => {
				return Err(fail(
					ledger,
					Step::LookupIdentity,
					WorkflowError::PhoneInUse(phone.to_string()),
				));
			}
			Ok(_) => ledger.succeeded(Step::LookupIdentity),
			Err(e) if e.is_not_found() => ledger.succeeded(Step::LookupIdentity),
			Err(e) => {
				return Err(fail(
					ledger,
					Step::LookupIdentity,
					WorkflowError::IdentityLookup(e),
				));
			}
		}

		match self.identity.update_phone(uid, phone).await {
			Ok(_) => {
				ledger.effect(
					Step::UpdateIdentityPhone,
					Effect::IdentityPhoneUpdated {
						uid: uid.to_string(),
						phone: phone.to_string(),
					},
				);
				Ok(())
			}
			// Another identity took the phone between lookup and update.
			Err(IdentityError::PhoneNumberExists(_)) => Err(fail(
				ledger,
				Step::UpdateIdentityPhone,
				WorkflowError::PhoneInUse(phone.to_string()),
			)),
			Err(e) => Err(fail(
				ledger,
				Step::UpdateIdentityPhone,
				WorkflowError::IdentityUpdate(e),
			)),
		}
	}

	async fn run_delete(
		&self,
		ledger: &mut EffectLedger,
		id: &SupplierId,
	) -> Result<(), WorkflowError> {
		let existing = self.load(ledger, id).await?;

		self.identity
			.delete_user(&existing.uid)
			.await
			.map_err(|e| fail(ledger, Step::DeleteIdentity, WorkflowError::IdentityDelete(e)))?;
		ledger.effect(
			Step::DeleteIdentity,
			Effect::IdentityDeleted {
				uid: existing.uid.clone(),
			},
		);

		self.store
			.delete(id)
			.await
			.map_err(|e| fail(ledger, Step::DeleteDocument, WorkflowError::Document(e)))?;
		ledger.effect(
			Step::DeleteDocument,
			Effect::DocumentDeleted { id: id.clone() },
		);

		tracing::info!("supplier deleted");
		Ok(())
	}

	async fn run_approve(
		&self,
		ledger: &mut EffectLedger,
		id: &SupplierId,
	) -> Result<DateTime<Utc>, WorkflowError> {
		self.load(ledger, id).await?;

		let approved_at = self.clock.now();
		self.store
			.set_approval(id, approved_at)
			.await
			.map_err(|e| fail(ledger, Step::SetApproval, WorkflowError::Document(e)))?;
		ledger.effect(
			Step::SetApproval,
			Effect::DocumentApproved { id: id.clone() },
		);

		tracing::info!(%approved_at, "supplier approved");
		Ok(approved_at)
	}

	async fn run_authenticate(
		&self,
		ledger: &mut EffectLedger,
		id: &SupplierId,
	) -> Result<AuthenticateOutcome, WorkflowError> {
		let existing = self.load(ledger, id).await?;

		let contact = existing.auth_contact();
		let Some(phone) = contact.phone else {
			return Err(fail(
				ledger,
				Step::ValidateInput,
				WorkflowError::MissingPhone(id.clone()),
			));
		};
		ledger.succeeded(Step::ValidateInput);

		match self.identity.get_user_by_phone(&phone).await {
			Ok(user) => {
				ledger.succeeded(Step::LookupIdentity);
				tracing::debug!(uid = %user.uid, "supplier already authenticated");
				return Ok(AuthenticateOutcome::AlreadyAuthenticated { uid: user.uid });
			}
			Err(e) if e.is_not_found() => ledger.succeeded(Step::LookupIdentity),
			Err(e) => {
				return Err(fail(
					ledger,
					Step::LookupIdentity,
					WorkflowError::IdentityLookup(e),
				));
			}
		}

		let identity = self
			.identity
			.create_user(&NewIdentity {
				phone_number: phone,
				display_name: contact.name,
				email: contact.email,
			})
			.await
			.map_err(|e| fail(ledger, Step::CreateIdentity, WorkflowError::IdentityCreate(e)))?;
		ledger.effect(
			Step::CreateIdentity,
			Effect::IdentityCreated {
				uid: identity.uid.clone(),
			},
		);

		self.store
			.set_uid(id, &identity.uid)
			.await
			.map_err(|e| fail(ledger, Step::UpdateDocumentUid, WorkflowError::Document(e)))?;
		ledger.effect(
			Step::UpdateDocumentUid,
			Effect::DocumentUidUpdated {
				id: id.clone(),
				uid: identity.uid.clone(),
			},
		);

		tracing::info!(uid = %identity.uid, "supplier identity created");
		Ok(AuthenticateOutcome::Created { uid: identity.uid })
	}
}

fn fail(ledger: &mut EffectLedger, step: Step, error: WorkflowError) -> WorkflowError {
	ledger.failed(step, error.to_string());
	error
}

fn finish<T>(ledger: EffectLedger, result: Result<T, WorkflowError>) -> Result<T, WorkflowFailure> {
	result.map_err(|error| WorkflowFailure::new(error, ledger))
}
