// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	extract::multipart::MultipartError,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use mawrid_server_db::DbError;
use mawrid_server_identity::IdentityError;
use mawrid_server_storage::StorageError;
use mawrid_server_suppliers::{WorkflowError, WorkflowFailure};
use serde::Serialize;
use utoipa::ToSchema;

/// Errors returned from request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// A supplier workflow step failed.
	#[error(transparent)]
	Workflow(#[from] WorkflowFailure),

	/// The multipart body could not be read.
	#[error("Invalid multipart body: {0}")]
	Multipart(#[from] MultipartError),
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

/// Status and error code for a workflow error.
pub fn workflow_status(error: &WorkflowError) -> (StatusCode, &'static str) {
	match error {
		WorkflowError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
		WorkflowError::InvalidPhoneFormat(_) => (StatusCode::BAD_REQUEST, "invalid_phone_format"),
		WorkflowError::MissingPhone(_) => (StatusCode::BAD_REQUEST, "missing_phone"),
		WorkflowError::PhoneInUse(_) => (StatusCode::BAD_REQUEST, "phone_in_use"),
		WorkflowError::IdentityCreate(IdentityError::PhoneNumberExists(_)) => {
			(StatusCode::BAD_REQUEST, "phone_in_use")
		}
		WorkflowError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
		WorkflowError::IdentityCreate(_)
		| WorkflowError::IdentityUpdate(_)
		| WorkflowError::IdentityDelete(_)
		| WorkflowError::IdentityLookup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "identity_error"),
		WorkflowError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
		WorkflowError::Document(_) => (StatusCode::INTERNAL_SERVER_ERROR, "document_error"),
	}
}

fn log_workflow_failure(failure: &WorkflowFailure, status: StatusCode) {
	let ledger = &failure.ledger;
	let supplier_id = ledger.supplier_id().map(|id| id.to_string()).unwrap_or_default();
	let failed_step = ledger
		.failed_step()
		.and_then(|step| serde_json::to_string(&step).ok())
		.unwrap_or_default();
	let orphans = serde_json::to_string(&ledger.orphans()).unwrap_or_default();

	if status.is_server_error() {
		tracing::error!(
			operation = %ledger.operation(),
			supplier_id = %supplier_id,
			failed_step = %failed_step,
			orphans = %orphans,
			error = %failure.error,
			"supplier workflow failed"
		);
	} else {
		tracing::warn!(
			operation = %ledger.operation(),
			supplier_id = %supplier_id,
			error = %failure.error,
			"supplier request rejected"
		);
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::Workflow(failure) => {
				let (status, code) = workflow_status(&failure.error);
				log_workflow_failure(failure, status);
				(
					status,
					ErrorResponse {
						error: code.to_string(),
						message: failure.error.to_string(),
					},
				)
			}
			ServerError::Multipart(e) => {
				tracing::warn!(error = %e, "failed to read multipart body");
				(
					e.status(),
					ErrorResponse {
						error: "invalid_multipart".to_string(),
						message: e.body_text(),
					},
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}

/// Failures while wiring up the server before it starts listening.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
	#[error("missing configuration: {0}")]
	MissingConfig(&'static str),

	#[error("invalid CORS origin: {0}")]
	InvalidCorsOrigin(String),

	#[error("database setup failed: {0}")]
	Database(#[from] DbError),

	#[error("identity provider setup failed: {0}")]
	Identity(#[from] IdentityError),

	#[error("blob store setup failed: {0}")]
	Storage(#[from] StorageError),
}
