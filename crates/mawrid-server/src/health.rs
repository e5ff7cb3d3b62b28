// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check types and component checking logic.

use mawrid_server_config::ProviderMode;
use mawrid_server_db::SupplierStore;
use mawrid_supplier_core::SupplierId;
use serde::Serialize;
use tokio::time::{timeout, Duration, Instant};
use utoipa::ToSchema;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_ID: &str = "health-probe";

/// Health status for components and overall system.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

/// Document store component health.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentStoreHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Which collaborator backends are wired in.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProvidersHealth {
	pub status: HealthStatus,
	pub mode: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthComponents {
	pub document_store: DocumentStoreHealth,
	pub providers: ProvidersHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: String,
	pub components: HealthComponents,
}

/// Probe the document store with a read of an id that never exists.
pub async fn check_document_store(store: &dyn SupplierStore) -> DocumentStoreHealth {
	let start = Instant::now();
	let probe = SupplierId::new(PROBE_ID);

	let (status, error) = match timeout(CHECK_TIMEOUT, store.get(&probe)).await {
		Ok(Ok(_)) => (HealthStatus::Healthy, None),
		Ok(Err(e)) => (HealthStatus::Unhealthy, Some(e.to_string())),
		Err(_) => (
			HealthStatus::Unhealthy,
			Some(format!("timed out after {}s", CHECK_TIMEOUT.as_secs())),
		),
	};

	DocumentStoreHealth {
		status,
		latency_ms: start.elapsed().as_millis() as u64,
		error,
	}
}

pub fn check_providers(mode: ProviderMode) -> ProvidersHealth {
	ProvidersHealth {
		status: HealthStatus::Healthy,
		mode: mode.to_string(),
	}
}

pub fn aggregate_status(components: &HealthComponents) -> HealthStatus {
	if components.document_store.status == HealthStatus::Healthy
		&& components.providers.status == HealthStatus::Healthy
	{
		HealthStatus::Healthy
	} else {
		HealthStatus::Unhealthy
	}
}
