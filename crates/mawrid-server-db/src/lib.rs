// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supplier document store.
//!
//! One document per supplier, keyed by [`SupplierId`](mawrid_supplier_core::SupplierId).
//! [`SqliteSupplierStore`] persists documents with `sqlx`;
//! [`InMemorySupplierStore`] is used by tests and the `memory` provider mode.

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod sqlite;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{DbError, Result};
pub use memory::{InMemorySupplierStore, StoreOp};
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use sqlite::SqliteSupplierStore;
pub use store::SupplierStore;
