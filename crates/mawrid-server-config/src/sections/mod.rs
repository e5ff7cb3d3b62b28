// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod cors;
mod database;
mod http;
mod identity;
mod logging;
mod providers;
mod storage;

pub use cors::{CorsConfig, CorsConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use identity::{IdentityConfig, IdentityConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use providers::{ProviderMode, ProvidersConfig, ProvidersConfigLayer};
pub use storage::{StorageConfig, StorageConfigLayer};
