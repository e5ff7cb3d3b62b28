// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for mawrid-server, served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
	info(
		title = "Mawrid Supplier API",
		version = "1.0.0",
		description = "Supplier registration, editing, approval and identity linking.",
		license(name = "Proprietary")
	),
	servers(
		(url = "/", description = "Local server")
	),
	tags(
		(name = "suppliers", description = "Supplier record operations"),
		(name = "health", description = "Health checks")
	),
	paths(
		crate::routes::suppliers::get_supplier,
		crate::routes::suppliers::create_supplier,
		crate::routes::suppliers::edit_supplier,
		crate::routes::suppliers::delete_supplier,
		crate::routes::suppliers::approve_supplier,
		crate::routes::suppliers::authenticate_supplier,
		crate::routes::health::health_check,
	),
	components(schemas(
		mawrid_supplier_core::Supplier,
		mawrid_supplier_core::SupplierFields,
		mawrid_supplier_core::SupplierId,
		crate::routes::suppliers::MessageResponse,
		crate::routes::suppliers::CreateSupplierResponse,
		crate::routes::suppliers::EditSupplierResponse,
		crate::routes::suppliers::AuthenticateSupplierResponse,
		crate::error::ErrorResponse,
		crate::health::HealthResponse,
		crate::health::HealthComponents,
		crate::health::HealthStatus,
		crate::health::DocumentStoreHealth,
		crate::health::ProvidersHealth,
	))
)]
pub struct ApiDoc;
