// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blob storage for supplier uploads.
//!
//! Uploaded files are written once under a generated, timestamped path and
//! are never overwritten or deleted by the service. The workflow depends on the
//! [`BlobStore`] trait; [`GcsBlobStore`] is the hosted implementation and
//! [`InMemoryBlobStore`] backs tests and local runs.

pub mod error;
pub mod gcs;
pub mod memory;
pub mod path;
pub mod store;

pub use error::StorageError;
pub use gcs::{GcsBlobStore, GcsConfig};
pub use memory::{InMemoryBlobStore, StoredBlob};
pub use path::{object_path, sanitize_file_name};
pub use store::{BlobStore, StoredObject};
