// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use mawrid_server_db::{InMemorySupplierStore, StoreOp};
use mawrid_server_identity::{
	IdentityError, IdentityOp, IdentityProvider, IdentityUser, InMemoryIdentityProvider,
};
use mawrid_server_storage::InMemoryBlobStore;
use mawrid_server_suppliers::{
	AuthenticateOutcome, Clock, Effect, Operation, Step, SupplierWorkflow, WorkflowError,
};
use mawrid_supplier_core::{
	FileSlot, SupplierFields, SupplierId, SupplierUploads, UploadedFile, SUPPLIER_ROLE,
};

/// Clock that advances one second per reading.
struct SteppingClock {
	next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
	fn new() -> Self {
		Self {
			next: Mutex::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()),
		}
	}
}

impl Clock for SteppingClock {
	fn now(&self) -> DateTime<Utc> {
		let mut next = self.next.lock().unwrap();
		let now = *next;
		*next = now + Duration::seconds(1);
		now
	}
}

struct Harness {
	identity: Arc<InMemoryIdentityProvider>,
	blobs: Arc<InMemoryBlobStore>,
	store: Arc<InMemorySupplierStore>,
	workflow: SupplierWorkflow,
}

fn harness() -> Harness {
	let identity = Arc::new(InMemoryIdentityProvider::new());
	let blobs = Arc::new(InMemoryBlobStore::new());
	let store = Arc::new(InMemorySupplierStore::new());
	let workflow = SupplierWorkflow::new(identity.clone(), blobs.clone(), store.clone())
		.with_clock(Arc::new(SteppingClock::new()));
	Harness {
		identity,
		blobs,
		store,
		workflow,
	}
}

fn ali() -> SupplierFields {
	SupplierFields {
		name: Some("Ali".to_string()),
		phone: Some("+966500000000".to_string()),
		email: Some("a@x.com".to_string()),
		company_name: Some("Acme".to_string()),
		cr_number: Some("123".to_string()),
		..Default::default()
	}
}

fn file(name: &str, content_type: &str, body: &'static [u8]) -> UploadedFile {
	UploadedFile {
		file_name: Some(name.to_string()),
		content_type: Some(content_type.to_string()),
		bytes: Bytes::from_static(body),
	}
}

fn both_files() -> SupplierUploads {
	SupplierUploads {
		company_logo: Some(file("logo.png", "image/png", b"png-bytes")),
		cr_license: Some(file("cr.pdf", "application/pdf", b"pdf-bytes")),
	}
}

async fn create_ali(h: &Harness) -> SupplierId {
	h.workflow
		.create(ali(), SupplierUploads::default())
		.await
		.unwrap()
		.id
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn get_unknown_supplier_is_not_found() {
	let h = harness();
	let failure = h.workflow.get(&SupplierId::new("ghost")).await.unwrap_err();
	assert!(matches!(failure.error, WorkflowError::NotFound(_)));
	assert_eq!(failure.ledger.operation(), Operation::Get);
}

#[tokio::test]
async fn get_surfaces_document_store_errors() {
	let h = harness();
	h.store.fail_on(StoreOp::Get);
	let failure = h.workflow.get(&SupplierId::new("any")).await.unwrap_err();
	assert!(matches!(failure.error, WorkflowError::Document(_)));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_without_files_writes_null_urls() {
	let h = harness();
	let outcome = h
		.workflow
		.create(ali(), SupplierUploads::default())
		.await
		.unwrap();

	let stored = h.workflow.get(&outcome.id).await.unwrap();
	assert_eq!(stored, outcome.supplier);
	assert_eq!(stored.name, "Ali");
	assert_eq!(stored.phone, "+966500000000");
	assert_eq!(stored.email, "a@x.com");
	assert_eq!(stored.company_name, "Acme");
	assert_eq!(stored.cr_number, "123");
	assert_eq!(stored.role, SUPPLIER_ROLE);
	assert!(stored.logo_url.is_none());
	assert!(stored.cr_license_url.is_none());
	assert!(!stored.is_approved);
	assert!(stored.other_cities_served.is_empty());
	assert!(h.blobs.is_empty());

	let identity = h.identity.get(&outcome.id.0).unwrap();
	assert_eq!(identity.phone_number.as_deref(), Some("+966500000000"));
	assert_eq!(identity.display_name.as_deref(), Some("Ali"));
	assert_eq!(stored.uid, identity.uid);
}

#[tokio::test]
async fn create_with_files_links_exact_upload_paths() {
	let h = harness();
	let outcome = h.workflow.create(ali(), both_files()).await.unwrap();
	let uid = outcome.id.as_str();

	let paths = h.blobs.paths();
	assert_eq!(paths.len(), 2);
	let logo_path = paths
		.iter()
		.find(|p| p.starts_with(&format!("suppliers/{uid}/company-logo/")))
		.unwrap();
	let license_path = paths
		.iter()
		.find(|p| p.starts_with(&format!("suppliers/{uid}/cr-license/")))
		.unwrap();
	assert!(logo_path.ends_with("-logo.png"));
	assert!(license_path.ends_with("-cr.pdf"));

	let stored = h.workflow.get(&outcome.id).await.unwrap();
	assert_eq!(stored.logo_url, Some(h.blobs.url_for(logo_path)));
	assert_eq!(stored.cr_license_url, Some(h.blobs.url_for(license_path)));
	assert_eq!(h.blobs.get(logo_path).unwrap().content_type, "image/png");
}

#[tokio::test]
async fn create_keeps_optional_fields_and_cities() {
	let h = harness();
	let mut fields = ali();
	fields.city = Some("Riyadh".to_string());
	fields.push_cities(["Jeddah".to_string(), "Dammam".to_string()]);
	fields.representative_name = Some("Omar".to_string());

	let outcome = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap();

	assert_eq!(outcome.supplier.city.as_deref(), Some("Riyadh"));
	assert_eq!(
		outcome.supplier.other_cities_served,
		vec!["Jeddah".to_string(), "Dammam".to_string()]
	);
	assert_eq!(outcome.supplier.representative_name.as_deref(), Some("Omar"));
}

#[tokio::test]
async fn create_missing_fields_reports_all_and_writes_nothing() {
	let h = harness();
	let fields = SupplierFields {
		name: Some("Ali".to_string()),
		email: Some(String::new()),
		..Default::default()
	};

	let failure = h.workflow.create(fields, both_files()).await.unwrap_err();

	match failure.error {
		WorkflowError::InvalidInput(missing) => {
			assert_eq!(missing, vec!["phone", "email", "companyName", "crNumber"]);
		}
		other => panic!("unexpected error: {other:?}"),
	}
	assert_eq!(failure.ledger.failed_step(), Some(Step::ValidateInput));
	assert!(failure.ledger.orphans().is_empty());
	assert!(h.identity.is_empty());
	assert!(h.blobs.is_empty());
	assert!(h.store.is_empty());
}

#[tokio::test]
async fn create_malformed_phone_fails_before_identity() {
	let h = harness();
	for phone in ["0501234567", "phone", "+", "+96650000000000000"] {
		let mut fields = ali();
		fields.phone = Some(phone.to_string());

		let failure = h
			.workflow
			.create(fields, SupplierUploads::default())
			.await
			.unwrap_err();
		assert!(
			matches!(failure.error, WorkflowError::InvalidPhoneFormat(ref p) if p == phone),
			"phone {phone} should be rejected"
		);
	}
	assert!(h.identity.is_empty());
}

#[tokio::test]
async fn create_duplicate_phone_aborts_before_storage() {
	let h = harness();
	create_ali(&h).await;

	let failure = h.workflow.create(ali(), both_files()).await.unwrap_err();

	assert!(matches!(
		failure.error,
		WorkflowError::IdentityCreate(IdentityError::PhoneNumberExists(_))
	));
	assert!(h.blobs.is_empty());
	assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn create_storage_failure_orphans_identity() {
	let h = harness();
	h.blobs.set_fail_puts(true);

	let failure = h.workflow.create(ali(), both_files()).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::Storage(_)));
	assert_eq!(
		failure.ledger.failed_step(),
		Some(Step::upload(FileSlot::CompanyLogo))
	);
	let orphan_uid = h.identity.users()[0].uid.clone();
	assert_eq!(
		failure.ledger.orphans(),
		vec![&Effect::IdentityCreated {
			uid: orphan_uid.clone()
		}]
	);
	assert_eq!(
		failure.ledger.supplier_id(),
		Some(&SupplierId::new(orphan_uid))
	);
	assert!(h.store.is_empty());
}

#[tokio::test]
async fn create_document_failure_orphans_identity_and_blobs() {
	let h = harness();
	h.store.fail_on(StoreOp::Create);

	let failure = h.workflow.create(ali(), both_files()).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::Document(_)));
	let orphans = failure.ledger.orphans();
	assert_eq!(orphans.len(), 3);
	assert!(matches!(orphans[0], Effect::IdentityCreated { .. }));
	assert!(matches!(orphans[1], Effect::BlobStored { .. }));
	assert!(matches!(orphans[2], Effect::BlobStored { .. }));
	assert_eq!(h.identity.len(), 1);
	assert_eq!(h.blobs.len(), 2);
	assert!(h.store.is_empty());
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn edit_unknown_supplier_is_not_found() {
	let h = harness();
	let failure = h
		.workflow
		.edit(&SupplierId::new("ghost"), ali(), both_files())
		.await
		.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::NotFound(_)));
	assert!(h.blobs.is_empty());
}

#[tokio::test]
async fn edit_merges_with_fallback() {
	let h = harness();
	let mut fields = ali();
	fields.city = Some("Riyadh".to_string());
	let id = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap()
		.id;

	let edit = SupplierFields {
		name: Some(String::new()),
		company_name: Some("Acme Trading".to_string()),
		region: Some("Central".to_string()),
		..Default::default()
	};
	let updated = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap();

	assert_eq!(updated.name, "Ali");
	assert_eq!(updated.company_name, "Acme Trading");
	assert_eq!(updated.city.as_deref(), Some("Riyadh"));
	assert_eq!(updated.region.as_deref(), Some("Central"));
	assert!(updated.updated_at.is_some());
	assert_eq!(h.workflow.get(&id).await.unwrap(), updated);
}

#[tokio::test]
async fn edit_without_cities_resets_list_every_time() {
	let h = harness();
	let mut fields = ali();
	fields.push_cities(["Jeddah".to_string()]);
	let id = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap()
		.id;

	for _ in 0..2 {
		let updated = h
			.workflow
			.edit(&id, SupplierFields::default(), SupplierUploads::default())
			.await
			.unwrap();
		assert!(updated.other_cities_served.is_empty());
	}
}

#[tokio::test]
async fn edit_replaces_cities_with_submitted_list() {
	let h = harness();
	let mut fields = ali();
	fields.push_cities(["Jeddah".to_string()]);
	let id = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap()
		.id;

	let mut edit = SupplierFields::default();
	edit.push_cities(["Dammam".to_string(), "Tabuk".to_string()]);
	let updated = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap();

	assert_eq!(
		updated.other_cities_served,
		vec!["Dammam".to_string(), "Tabuk".to_string()]
	);
}

#[tokio::test]
async fn edit_phone_owned_by_other_identity_is_rejected() {
	let h = harness();
	let id = create_ali(&h).await;
	h.identity.insert(IdentityUser {
		uid: "someone-else".to_string(),
		phone_number: Some("+966511111111".to_string()),
		display_name: None,
		email: None,
	});
	let before = h.store.snapshot(&id).unwrap();

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966511111111".to_string());
	edit.company_name = Some("Changed".to_string());
	let failure = h
		.workflow
		.edit(&id, edit, both_files())
		.await
		.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::PhoneInUse(_)));
	assert_eq!(failure.ledger.failed_step(), Some(Step::LookupIdentity));
	assert_eq!(h.store.snapshot(&id).unwrap(), before);
	assert!(h.blobs.is_empty());
}

#[tokio::test]
async fn edit_phone_relinks_identity() {
	let h = harness();
	let id = create_ali(&h).await;

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966522222222".to_string());
	let updated = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap();

	assert_eq!(updated.phone, "+966522222222");
	assert_eq!(
		h.identity.get(id.as_str()).unwrap().phone_number.as_deref(),
		Some("+966522222222")
	);
}

#[tokio::test]
async fn edit_with_own_phone_is_allowed() {
	let h = harness();
	let id = create_ali(&h).await;

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966500000000".to_string());
	edit.email = Some("ali@acme.sa".to_string());
	let updated = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap();

	assert_eq!(updated.email, "ali@acme.sa");
}

#[tokio::test]
async fn edit_malformed_phone_is_rejected() {
	let h = harness();
	let id = create_ali(&h).await;

	let mut edit = SupplierFields::default();
	edit.phone = Some("abc".to_string());
	let failure = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::InvalidPhoneFormat(_)));
}

#[tokio::test]
async fn edit_lookup_failure_is_fatal() {
	let h = harness();
	let id = create_ali(&h).await;
	h.identity.fail_on(IdentityOp::Lookup);

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966522222222".to_string());
	let failure = h
		.workflow
		.edit(&id, edit, SupplierUploads::default())
		.await
		.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::IdentityLookup(_)));
}

#[tokio::test]
async fn edit_identity_update_failure_leaves_document() {
	let h = harness();
	let id = create_ali(&h).await;
	let before = h.store.snapshot(&id).unwrap();
	h.identity.fail_on(IdentityOp::UpdatePhone);

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966522222222".to_string());
	let failure = h
		.workflow
		.edit(&id, edit, both_files())
		.await
		.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::IdentityUpdate(_)));
	assert_eq!(h.store.snapshot(&id).unwrap(), before);
	assert!(h.blobs.is_empty());
}

#[tokio::test]
async fn edit_uploads_to_new_paths_and_keeps_old_blobs() {
	let h = harness();
	let id = h.workflow.create(ali(), both_files()).await.unwrap().id;
	let original = h.store.snapshot(&id).unwrap();

	let uploads = SupplierUploads {
		company_logo: Some(file("logo.png", "image/png", b"new-png")),
		cr_license: None,
	};
	let updated = h
		.workflow
		.edit(&id, SupplierFields::default(), uploads)
		.await
		.unwrap();

	assert_ne!(updated.logo_url, original.logo_url);
	assert_eq!(updated.cr_license_url, original.cr_license_url);
	assert_eq!(h.blobs.len(), 3);
}

#[tokio::test]
async fn edit_document_failure_orphans_phone_change_and_blob() {
	let h = harness();
	let id = create_ali(&h).await;
	h.store.fail_on(StoreOp::Update);

	let mut edit = SupplierFields::default();
	edit.phone = Some("+966522222222".to_string());
	let uploads = SupplierUploads {
		company_logo: None,
		cr_license: Some(file("cr.pdf", "application/pdf", b"pdf")),
	};
	let failure = h.workflow.edit(&id, edit, uploads).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::Document(_)));
	let orphans = failure.ledger.orphans();
	assert_eq!(orphans.len(), 2);
	assert!(matches!(orphans[0], Effect::IdentityPhoneUpdated { .. }));
	assert!(matches!(orphans[1], Effect::BlobStored { .. }));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_removes_identity_and_document() {
	let h = harness();
	let id = create_ali(&h).await;

	h.workflow.delete(&id).await.unwrap();

	assert!(h.identity.is_empty());
	let failure = h.workflow.get(&id).await.unwrap_err();
	assert!(matches!(failure.error, WorkflowError::NotFound(_)));
}

#[tokio::test]
async fn delete_unknown_supplier_is_not_found() {
	let h = harness();
	let failure = h
		.workflow
		.delete(&SupplierId::new("ghost"))
		.await
		.unwrap_err();
	assert!(matches!(failure.error, WorkflowError::NotFound(_)));
}

#[tokio::test]
async fn delete_identity_failure_keeps_document() {
	let h = harness();
	let id = create_ali(&h).await;
	h.identity.fail_on(IdentityOp::Delete);

	let failure = h.workflow.delete(&id).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::IdentityDelete(_)));
	assert!(h.store.snapshot(&id).is_some());
	assert!(failure.ledger.orphans().is_empty());
}

#[tokio::test]
async fn delete_document_failure_leaves_dangling_document() {
	let h = harness();
	let id = create_ali(&h).await;
	h.store.fail_on(StoreOp::Delete);

	let failure = h.workflow.delete(&id).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::Document(_)));
	assert!(matches!(
		failure.ledger.orphans()[..],
		[Effect::IdentityDeleted { .. }]
	));
	assert!(h.identity.is_empty());
	assert!(h.store.snapshot(&id).is_some());
}

// =============================================================================
// Approve
// =============================================================================

#[tokio::test]
async fn approve_is_idempotent_and_refreshes_timestamp() {
	let h = harness();
	let id = create_ali(&h).await;

	let first = h.workflow.approve(&id).await.unwrap();
	let after_first = h.workflow.get(&id).await.unwrap();
	let second = h.workflow.approve(&id).await.unwrap();
	let after_second = h.workflow.get(&id).await.unwrap();

	assert!(after_first.is_approved);
	assert_eq!(after_first.approved_at, Some(first));
	assert!(after_second.is_approved);
	assert_eq!(after_second.approved_at, Some(second));
	assert!(second > first);
	assert_eq!(h.identity.len(), 1);
}

#[tokio::test]
async fn approve_unknown_supplier_is_not_found() {
	let h = harness();
	let failure = h
		.workflow
		.approve(&SupplierId::new("ghost"))
		.await
		.unwrap_err();
	assert!(matches!(failure.error, WorkflowError::NotFound(_)));
}

// =============================================================================
// Authenticate
// =============================================================================

#[tokio::test]
async fn authenticate_existing_identity_is_noop() {
	let h = harness();
	let id = create_ali(&h).await;

	let outcome = h.workflow.authenticate(&id).await.unwrap();

	assert_eq!(
		outcome,
		AuthenticateOutcome::AlreadyAuthenticated {
			uid: id.0.clone()
		}
	);
	assert_eq!(h.identity.len(), 1);
}

#[tokio::test]
async fn authenticate_recreates_missing_identity_once() {
	let h = harness();
	let id = create_ali(&h).await;
	// Identity removed out of band.
	h.identity.delete_user(id.as_str()).await.unwrap();

	let first = h.workflow.authenticate(&id).await.unwrap();
	let AuthenticateOutcome::Created { uid } = first else {
		panic!("expected a new identity, got {first:?}");
	};
	assert_ne!(uid, id.0);
	let stored = h.workflow.get(&id).await.unwrap();
	assert_eq!(stored.id, id);
	assert_eq!(stored.uid, uid);

	let second = h.workflow.authenticate(&id).await.unwrap();
	assert_eq!(
		second,
		AuthenticateOutcome::AlreadyAuthenticated { uid: uid.clone() }
	);
	assert_eq!(h.identity.len(), 1);
	assert_eq!(h.workflow.get(&id).await.unwrap().uid, uid);
}

#[tokio::test]
async fn authenticate_prefers_representative_contact() {
	let h = harness();
	let mut fields = ali();
	fields.representative_phone = Some("+966533333333".to_string());
	fields.representative_name = Some("Omar".to_string());
	let id = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap()
		.id;

	let outcome = h.workflow.authenticate(&id).await.unwrap();

	let AuthenticateOutcome::Created { uid } = outcome else {
		panic!("representative phone has no identity yet");
	};
	let identity = h.identity.get(&uid).unwrap();
	assert_eq!(identity.phone_number.as_deref(), Some("+966533333333"));
	assert_eq!(identity.display_name.as_deref(), Some("Omar"));
	assert_eq!(identity.email.as_deref(), Some("a@x.com"));
}

#[tokio::test]
async fn authenticate_without_phone_is_rejected() {
	let h = harness();
	let id = create_ali(&h).await;
	let mut record = h.store.snapshot(&id).unwrap();
	record.phone = String::new();
	h.store.insert(record);

	let failure = h.workflow.authenticate(&id).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::MissingPhone(_)));
}

#[tokio::test]
async fn authenticate_lookup_failure_is_fatal() {
	let h = harness();
	let id = create_ali(&h).await;
	h.identity.fail_on(IdentityOp::Lookup);

	let failure = h.workflow.authenticate(&id).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::IdentityLookup(_)));
	assert_eq!(h.identity.len(), 1);
}

#[tokio::test]
async fn authenticate_uid_write_failure_orphans_identity() {
	let h = harness();
	let mut fields = ali();
	fields.representative_phone = Some("+966533333333".to_string());
	let id = h
		.workflow
		.create(fields, SupplierUploads::default())
		.await
		.unwrap()
		.id;
	h.store.fail_on(StoreOp::SetUid);

	let failure = h.workflow.authenticate(&id).await.unwrap_err();

	assert!(matches!(failure.error, WorkflowError::Document(_)));
	assert!(matches!(
		failure.ledger.orphans()[..],
		[Effect::IdentityCreated { .. }]
	));
	assert_eq!(h.identity.len(), 2);
	assert_eq!(h.store.snapshot(&id).unwrap().uid, id.0);
}
