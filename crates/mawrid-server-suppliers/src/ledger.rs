// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Step-by-step record of a workflow run.
//!
//! The ledger is append-only. Each entry names the step, whether it succeeded,
//! and the external side effect it produced, if any. Side effects are never
//! undone, so after a failure every recorded effect is an orphan.

use mawrid_supplier_core::{FileSlot, SupplierId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	Get,
	Create,
	Edit,
	Delete,
	Approve,
	Authenticate,
}

impl Operation {
	pub fn as_str(self) -> &'static str {
		match self {
			Operation::Get => "get",
			Operation::Create => "create",
			Operation::Edit => "edit",
			Operation::Delete => "delete",
			Operation::Approve => "approve",
			Operation::Authenticate => "authenticate",
		}
	}
}

impl std::fmt::Display for Operation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "slot")]
pub enum Step {
	ValidateInput,
	LoadDocument,
	LookupIdentity,
	CreateIdentity,
	UpdateIdentityPhone,
	UploadFile(FileSlotName),
	WriteDocument,
	UpdateDocumentUid,
	SetApproval,
	DeleteIdentity,
	DeleteDocument,
}

/// Serializable wire name of a file slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSlotName(&'static str);

impl From<FileSlot> for FileSlotName {
	fn from(slot: FileSlot) -> Self {
		Self(slot.field_name())
	}
}

impl Step {
	pub fn upload(slot: FileSlot) -> Self {
		Step::UploadFile(slot.into())
	}
}

/// An irreversible change made in an external system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Effect {
	IdentityCreated { uid: String },
	IdentityPhoneUpdated { uid: String, phone: String },
	IdentityDeleted { uid: String },
	BlobStored { path: String, url: String },
	DocumentWritten { id: SupplierId },
	DocumentUidUpdated { id: SupplierId, uid: String },
	DocumentApproved { id: SupplierId },
	DocumentDeleted { id: SupplierId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "message")]
pub enum Outcome {
	Succeeded,
	Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
	pub step: Step,
	pub outcome: Outcome,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub effect: Option<Effect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectLedger {
	operation: Operation,
	#[serde(skip_serializing_if = "Option::is_none")]
	supplier_id: Option<SupplierId>,
	entries: Vec<StepRecord>,
}

impl EffectLedger {
	pub fn new(operation: Operation) -> Self {
		Self {
			operation,
			supplier_id: None,
			entries: Vec::new(),
		}
	}

	pub fn for_supplier(operation: Operation, id: &SupplierId) -> Self {
		Self {
			supplier_id: Some(id.clone()),
			..Self::new(operation)
		}
	}

	pub fn operation(&self) -> Operation {
		self.operation
	}

	/// Supplier the run acted on. Set by create once the identity exists.
	pub fn supplier_id(&self) -> Option<&SupplierId> {
		self.supplier_id.as_ref()
	}

	pub fn set_supplier_id(&mut self, id: SupplierId) {
		self.supplier_id = Some(id);
	}

	pub fn entries(&self) -> &[StepRecord] {
		&self.entries
	}

	/// Record a step that completed without an external side effect.
	pub fn succeeded(&mut self, step: Step) {
		self.entries.push(StepRecord {
			step,
			outcome: Outcome::Succeeded,
			effect: None,
		});
	}

	pub fn effect(&mut self, step: Step, effect: Effect) {
		self.entries.push(StepRecord {
			step,
			outcome: Outcome::Succeeded,
			effect: Some(effect),
		});
	}

	pub fn failed(&mut self, step: Step, message: impl Into<String>) {
		self.entries.push(StepRecord {
			step,
			outcome: Outcome::Failed(message.into()),
			effect: None,
		});
	}

	/// Step that ended the run, if it failed.
	pub fn failed_step(&self) -> Option<Step> {
		self.entries
			.iter()
			.find(|entry| matches!(entry.outcome, Outcome::Failed(_)))
			.map(|entry| entry.step)
	}

	pub fn is_failed(&self) -> bool {
		self.failed_step().is_some()
	}

	/// Every side effect recorded so far, in order.
	pub fn effects(&self) -> impl Iterator<Item = &Effect> {
		self.entries.iter().filter_map(|entry| entry.effect.as_ref())
	}

	/// Side effects left behind by a failed run. Empty when the run has not failed.
	pub fn orphans(&self) -> Vec<&Effect> {
		if self.is_failed() {
			self.effects().collect()
		} else {
			Vec::new()
		}
	}
}
