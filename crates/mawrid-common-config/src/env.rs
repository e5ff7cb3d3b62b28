// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment helpers for loading provider credentials.
//!
//! Supports the `*_FILE` convention used by Docker and Kubernetes secret mounts.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load a secret from `{var}_FILE` (preferred) or `{var}`.
///
/// A single trailing newline is stripped from file contents. Returns `Ok(None)`
/// when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(SecretString::new(value))),
		_ => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn returns_none_when_unset() {
		let var = "MAWRID_TEST_UNSET_SECRET";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn empty_value_counts_as_unset() {
		let var = "MAWRID_TEST_EMPTY_SECRET";
		env::set_var(var, "");
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());

		env::remove_var(var);
	}

	#[test]
	fn reads_direct_value() {
		let var = "MAWRID_TEST_DIRECT_SECRET";
		env::set_var(var, "direct-token");
		env::remove_var(format!("{var}_FILE"));

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-token");

		env::remove_var(var);
	}

	#[test]
	fn file_wins_over_direct_value_and_trailing_newline_is_stripped() {
		let var = "MAWRID_TEST_FILE_SECRET";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "file-token").unwrap();

		env::set_var(var, "direct-token");
		env::set_var(format!("{var}_FILE"), file.path().to_str().unwrap());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "file-token");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn missing_file_is_an_error() {
		let var = "MAWRID_TEST_MISSING_FILE_SECRET";
		env::set_var(format!("{var}_FILE"), "/nonexistent/mawrid/secret");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "MAWRID_TEST_EMPTY_PATH_SECRET";
		env::set_var(format!("{var}_FILE"), "");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));

		env::remove_var(format!("{var}_FILE"));
	}
}
