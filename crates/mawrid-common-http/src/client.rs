// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Client builder carrying the standard Mawrid User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Build a client whose requests fail after `timeout`.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// Format: `mawrid/{crate version}`
pub fn user_agent() -> String {
	format!("mawrid/{}", env!("CARGO_PKG_VERSION"))
}
