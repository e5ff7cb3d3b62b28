// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mawrid supplier server.
//!
//! This crate exposes the supplier record workflow over HTTP. Handlers parse
//! multipart forms, hand them to [`mawrid_server_suppliers::SupplierWorkflow`]
//! and translate workflow failures into JSON error bodies.

pub mod api;
pub mod api_docs;
pub mod error;
pub mod health;
pub mod routes;
pub mod supplier_form;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::{ErrorResponse, ServerError, StartupError};
pub use mawrid_server_config::ServerConfig;
