// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared outbound HTTP client for the identity and storage adapters.
//!
//! Provider calls are never retried; the only bound on a hanging provider is
//! the request timeout configured here.

mod client;

pub use client::{builder, new_client_with_timeout, user_agent};
