// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity provider integration for Mawrid.
//!
//! Suppliers authenticate by phone number against an external identity
//! provider. The workflow only depends on the [`IdentityProvider`] trait:
//!
//! - [`FirebaseIdentityClient`] talks to the Firebase Identity Toolkit v1 REST API
//! - [`InMemoryIdentityProvider`] keeps users in process memory, for tests and
//!   local runs without credentials
//!
//! Every call either returns a stable user id or one of the distinguished
//! [`IdentityError`] conditions (`NotFound`, `PhoneNumberExists`).

pub mod error;
pub mod firebase;
pub mod memory;
pub mod provider;

pub use error::IdentityError;
pub use firebase::{FirebaseIdentityClient, FirebaseIdentityConfig};
pub use memory::{IdentityOp, InMemoryIdentityProvider};
pub use provider::{IdentityProvider, IdentityUser, NewIdentity};
