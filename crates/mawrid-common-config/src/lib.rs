// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Common configuration primitives for Mawrid.
//!
//! - [`Secret<T>`]: wrapper that keeps provider credentials out of logs
//! - [`load_secret_env`]: loads a credential from `VAR` or the file named by `VAR_FILE`

pub mod env;
pub mod secret;

pub use env::{load_secret_env, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};
