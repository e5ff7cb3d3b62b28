// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::migrations::run_migrations;

/// Single-connection in-memory pool with the schema applied.
///
/// Each `:memory:` connection is its own database, so the pool is capped at one.
pub async fn create_supplier_test_pool() -> SqlitePool {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect(":memory:")
		.await
		.unwrap();
	run_migrations(&pool).await.unwrap();
	pool
}
