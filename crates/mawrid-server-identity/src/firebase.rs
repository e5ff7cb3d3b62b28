// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Firebase Identity Toolkit v1 client.
//!
//! Uses the project-scoped admin endpoints, authenticated with an OAuth access
//! token for a service account:
//!
//! | Operation | Endpoint |
//! |---|---|
//! | create | `POST /v1/projects/{project}/accounts` |
//! | update | `POST /v1/projects/{project}/accounts:update` |
//! | delete | `POST /v1/projects/{project}/accounts:delete` |
//! | lookup | `POST /v1/projects/{project}/accounts:lookup` |
//!
//! Provider error codes `USER_NOT_FOUND` and `PHONE_NUMBER_EXISTS` map to the
//! distinguished [`IdentityError`] variants; everything else is passed through.

use async_trait::async_trait;
use mawrid_common_config::SecretString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::IdentityError;
use crate::provider::{IdentityProvider, IdentityUser, NewIdentity};

pub const DEFAULT_API_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct FirebaseIdentityConfig {
	pub api_base_url: String,
	pub project_id: String,
	/// OAuth access token sent as a bearer credential.
	pub access_token: SecretString,
	pub timeout: Duration,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
	phone_number: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	display_name: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAccountRequest<'a> {
	local_id: &'a str,
	phone_number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAccountRequest<'a> {
	local_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
	phone_number: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
	local_id: String,
	phone_number: Option<String>,
	display_name: Option<String>,
	email: Option<String>,
}

impl From<AccountInfo> for IdentityUser {
	fn from(info: AccountInfo) -> Self {
		Self {
			uid: info.local_id,
			phone_number: info.phone_number,
			display_name: info.display_name,
			email: info.email,
		}
	}
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
	#[serde(default)]
	users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
struct EmptyResponse {}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: String,
}

// =============================================================================
// Client
// =============================================================================

#[derive(Debug, Clone)]
pub struct FirebaseIdentityClient {
	config: FirebaseIdentityConfig,
	http_client: reqwest::Client,
}

impl FirebaseIdentityClient {
	pub fn new(config: FirebaseIdentityConfig) -> Result<Self, IdentityError> {
		let http_client = mawrid_common_http::new_client_with_timeout(config.timeout)?;
		Ok(Self {
			config,
			http_client,
		})
	}

	fn endpoint(&self, operation: &str) -> String {
		format!(
			"{}/v1/projects/{}/{}",
			self.config.api_base_url.trim_end_matches('/'),
			self.config.project_id,
			operation
		)
	}

	async fn post<B, R>(&self, operation: &str, body: &B, subject: &str) -> Result<R, IdentityError>
	where
		B: Serialize + ?Sized,
		R: DeserializeOwned,
	{
		let response = self
			.http_client
			.post(self.endpoint(operation))
			.bearer_auth(self.config.access_token.expose())
			.json(body)
			.send()
			.await?;

		let status = response.status();
		let text = response.text().await?;

		if !status.is_success() {
			tracing::debug!(%status, operation, "identity provider rejected request");
			return Err(classify_error(&text, subject));
		}

		serde_json::from_str(&text)
			.map_err(|e| IdentityError::ParseError(format!("{operation} response: {e}")))
	}
}

/// Map a provider error body onto [`IdentityError`].
///
/// Messages look like `PHONE_NUMBER_EXISTS` or `USER_NOT_FOUND : detail`.
fn classify_error(body: &str, subject: &str) -> IdentityError {
	let message = serde_json::from_str::<ErrorEnvelope>(body)
		.map(|envelope| envelope.error.message)
		.unwrap_or_else(|_| body.to_string());

	let code = message.split(':').next().unwrap_or_default().trim();
	match code {
		"USER_NOT_FOUND" => IdentityError::NotFound(subject.to_string()),
		"PHONE_NUMBER_EXISTS" => IdentityError::PhoneNumberExists(subject.to_string()),
		_ => IdentityError::Provider(message),
	}
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
	#[tracing::instrument(skip(self, user), name = "FirebaseIdentityClient::create_user")]
	async fn create_user(&self, user: &NewIdentity) -> Result<IdentityUser, IdentityError> {
		let request = CreateAccountRequest {
			phone_number: &user.phone_number,
			display_name: user.display_name.as_deref(),
			email: user.email.as_deref(),
		};
		let info: AccountInfo = self
			.post("accounts", &request, &user.phone_number)
			.await?;

		tracing::debug!(uid = %info.local_id, "identity created");
		Ok(IdentityUser {
			uid: info.local_id,
			phone_number: Some(user.phone_number.clone()),
			display_name: user.display_name.clone(),
			email: user.email.clone(),
		})
	}

	#[tracing::instrument(skip(self, phone_number), name = "FirebaseIdentityClient::update_phone")]
	async fn update_phone(
		&self,
		uid: &str,
		phone_number: &str,
	) -> Result<IdentityUser, IdentityError> {
		let request = UpdateAccountRequest {
			local_id: uid,
			phone_number,
		};
		let info: AccountInfo = self.post("accounts:update", &request, uid).await?;
		Ok(IdentityUser {
			phone_number: Some(phone_number.to_string()),
			..info.into()
		})
	}

	#[tracing::instrument(skip(self), name = "FirebaseIdentityClient::delete_user")]
	async fn delete_user(&self, uid: &str) -> Result<(), IdentityError> {
		let request = DeleteAccountRequest { local_id: uid };
		let _: EmptyResponse = self.post("accounts:delete", &request, uid).await?;
		Ok(())
	}

	#[tracing::instrument(skip(self, phone_number), name = "FirebaseIdentityClient::get_user_by_phone")]
	async fn get_user_by_phone(&self, phone_number: &str) -> Result<IdentityUser, IdentityError> {
		let request = LookupRequest {
			phone_number: [phone_number],
		};
		let response: LookupResponse = self
			.post("accounts:lookup", &request, phone_number)
			.await?;

		response
			.users
			.into_iter()
			.next()
			.map(IdentityUser::from)
			.ok_or_else(|| IdentityError::NotFound(phone_number.to_string()))
	}
}
