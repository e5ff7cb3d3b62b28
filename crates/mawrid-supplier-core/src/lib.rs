// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Mawrid supplier records.
//!
//! This crate has no I/O. It defines the stored [`Supplier`] record, the request
//! contract ([`SupplierFields`], [`SupplierUploads`]), phone validation, and the
//! merge policies the edit workflow applies.

pub mod error;
pub mod fields;
pub mod merge;
pub mod phone;
pub mod supplier;

pub use error::SupplierError;
pub use fields::{FileSlot, RequiredFields, SupplierFields, SupplierUploads, UploadedFile};
pub use merge::{fallback, fallback_required, AuthContact, CitiesPolicy};
pub use phone::{is_valid_phone, validate_phone};
pub use supplier::{Supplier, SupplierId, SUPPLIER_ROLE};
