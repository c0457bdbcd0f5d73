//
//  tdx-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Acquisition
//!
//! Exchanges a username/password pair for a TDX bearer token with a single
//! `POST <api base>/auth/login`. The response body is the token, returned
//! verbatim. A non-success status is reported as [`ApiError::Http`] and is
//! never retried.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Serialize;

use super::{AuthToken, Credentials};
use crate::api::client::JSON_CONTENT_TYPE;
use crate::api::ApiError;

/// Login payload in the casing the TDX API expects.
#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

/// Retrieves a TDX auth token to use in API calls.
///
/// Builds a fresh HTTP client for the one request. Use
/// [`TdxClient::get_auth_token`](crate::api::TdxClient::get_auth_token) to
/// reuse an existing client instead.
///
/// # Errors
///
/// - [`ApiError::Http`] when the login endpoint answers with a non-2xx status
/// - [`ApiError::Network`] when the request cannot be sent or the body read
///
/// # Example
///
/// ```rust,no_run
/// use tdx_cli::auth::{get_auth_token, Credentials};
///
/// # async fn example() -> Result<(), tdx_cli::api::ApiError> {
/// let credentials = Credentials::new("user", "pass", "https://tdx.your.domain/TDWebApi/api")
///     .with_user_agent("My Automation");
/// let token = get_auth_token(&credentials).await?;
/// println!("Token has {} characters", token.as_str().len());
/// # Ok(())
/// # }
/// ```
pub async fn get_auth_token(credentials: &Credentials) -> Result<AuthToken, ApiError> {
    let http = Client::builder().build()?;
    request_token(&http, credentials).await
}

pub(crate) async fn request_token(
    http: &Client,
    credentials: &Credentials,
) -> Result<AuthToken, ApiError> {
    let url = format!("{}/auth/login", credentials.api_base_url);
    let payload = serde_json::to_string(&LoginRequest {
        user_name: &credentials.username,
        password: &credentials.password,
    })?;

    tracing::debug!(
        "Requesting auth token for {} from {}",
        credentials.username,
        url
    );

    let response = http
        .post(&url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(USER_AGENT, credentials.user_agent())
        .body(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("Login failed with status {}", status);
        return Err(ApiError::Http {
            status: status.as_u16(),
        });
    }

    let token = response.text().await?;
    Ok(AuthToken::new(token))
}
