// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supplier record HTTP handlers.

use axum::{
	extract::{Multipart, Path, State},
	http::StatusCode,
	Json,
};
use mawrid_server_suppliers::AuthenticateOutcome;
use mawrid_supplier_core::{Supplier, SupplierFields, SupplierId};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
	api::AppState,
	error::{ErrorResponse, ServerError},
	supplier_form::SupplierForm,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
	pub message: String,
}

impl MessageResponse {
	fn new(message: &str) -> Json<Self> {
		Json(Self {
			message: message.to_string(),
		})
	}
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSupplierResponse {
	pub id: SupplierId,
	pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditSupplierResponse {
	pub message: String,
	pub updated_data: Supplier,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticateSupplierResponse {
	pub message: String,
	/// Present only when a new identity was created.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uid: Option<String>,
}

#[utoipa::path(
	get,
	path = "/api/get-supplier/{id}",
	params(("id" = String, Path, description = "Supplier id")),
	responses(
		(status = 200, description = "Supplier record", body = Supplier),
		(status = 404, description = "Supplier not found", body = ErrorResponse),
		(status = 500, description = "Document store error", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn get_supplier(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Supplier>, ServerError> {
	let supplier = state.workflow.get(&SupplierId::new(id)).await?;
	Ok(Json(supplier))
}

#[utoipa::path(
	post,
	path = "/api/create-supplier",
	request_body(content = SupplierFields, content_type = "multipart/form-data",
		description = "Supplier fields plus optional companyLogo and crLicense files"),
	responses(
		(status = 201, description = "Supplier created", body = CreateSupplierResponse),
		(status = 400, description = "Invalid input or phone already in use", body = ErrorResponse),
		(status = 500, description = "Provider failure", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state, multipart))]
pub async fn create_supplier(
	State(state): State<AppState>,
	multipart: Multipart,
) -> Result<(StatusCode, Json<CreateSupplierResponse>), ServerError> {
	let form = SupplierForm::from_multipart(multipart).await?;
	let outcome = state.workflow.create(form.fields, form.uploads).await?;

	Ok((
		StatusCode::CREATED,
		Json(CreateSupplierResponse {
			id: outcome.id,
			message: "Supplier created successfully".to_string(),
		}),
	))
}

#[utoipa::path(
	put,
	path = "/api/edit-supplier/{id}",
	params(("id" = String, Path, description = "Supplier id")),
	request_body(content = SupplierFields, content_type = "multipart/form-data",
		description = "Fields to change plus optional replacement files"),
	responses(
		(status = 200, description = "Supplier updated", body = EditSupplierResponse),
		(status = 400, description = "Invalid phone or phone in use", body = ErrorResponse),
		(status = 404, description = "Supplier not found", body = ErrorResponse),
		(status = 500, description = "Provider failure", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state, multipart))]
pub async fn edit_supplier(
	State(state): State<AppState>,
	Path(id): Path<String>,
	multipart: Multipart,
) -> Result<Json<EditSupplierResponse>, ServerError> {
	let form = SupplierForm::from_multipart(multipart).await?;
	let updated = state
		.workflow
		.edit(&SupplierId::new(id), form.fields, form.uploads)
		.await?;

	Ok(Json(EditSupplierResponse {
		message: "Supplier updated successfully".to_string(),
		updated_data: updated,
	}))
}

#[utoipa::path(
	delete,
	path = "/api/delete-supplier/{id}",
	params(("id" = String, Path, description = "Supplier id")),
	responses(
		(status = 200, description = "Supplier deleted", body = MessageResponse),
		(status = 404, description = "Supplier not found", body = ErrorResponse),
		(status = 500, description = "Provider failure", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn delete_supplier(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
	state.workflow.delete(&SupplierId::new(id)).await?;
	Ok(MessageResponse::new("Supplier deleted successfully"))
}

#[utoipa::path(
	put,
	path = "/api/approve-supplier/{id}",
	params(("id" = String, Path, description = "Supplier id")),
	responses(
		(status = 200, description = "Supplier approved", body = MessageResponse),
		(status = 404, description = "Supplier not found", body = ErrorResponse),
		(status = 500, description = "Document store error", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn approve_supplier(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
	let approved_at = state.workflow.approve(&SupplierId::new(id)).await?;
	tracing::debug!(%approved_at, "supplier approved");
	Ok(MessageResponse::new("Supplier approved successfully"))
}

#[utoipa::path(
	post,
	path = "/api/authenticate-supplier/{id}",
	params(("id" = String, Path, description = "Supplier id")),
	responses(
		(status = 200, description = "Supplier already authenticated", body = AuthenticateSupplierResponse),
		(status = 201, description = "Identity created and linked", body = AuthenticateSupplierResponse),
		(status = 400, description = "Supplier has no phone number", body = ErrorResponse),
		(status = 404, description = "Supplier not found", body = ErrorResponse),
		(status = 500, description = "Provider failure", body = ErrorResponse)
	),
	tag = "suppliers"
)]
#[instrument(skip(state))]
pub async fn authenticate_supplier(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<(StatusCode, Json<AuthenticateSupplierResponse>), ServerError> {
	let outcome = state.workflow.authenticate(&SupplierId::new(id)).await?;

	let response = match outcome {
		AuthenticateOutcome::AlreadyAuthenticated { .. } => (
			StatusCode::OK,
			Json(AuthenticateSupplierResponse {
				message: "Supplier already authenticated".to_string(),
				uid: None,
			}),
		),
		AuthenticateOutcome::Created { uid } => (
			StatusCode::CREATED,
			Json(AuthenticateSupplierResponse {
				message: "Supplier authenticated successfully".to_string(),
				uid: Some(uid),
			}),
		),
	};
	Ok(response)
}
