// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::SqlitePool;

use crate::error::DbError;

/// Run all database migrations.
///
/// Migrations are idempotent and safe to run on every start.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	let m1 = include_str!("../migrations/001_supplier_documents.sql");
	for stmt in m1.split(';').filter(|s| !s.trim().is_empty()) {
		sqlx::query(stmt).execute(pool).await?;
	}

	tracing::info!("database migrations complete");
	Ok(())
}
