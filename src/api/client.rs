//
//  tdx-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the TDX API
//!
//! This module provides [`TdxClient`], the single place where authenticated
//! requests to the TeamDynamix Web API are built and sent.
//!
//! ## Request rules
//!
//! - URL is `api_base_url + endpoint_path`, concatenated as-is
//! - Headers: `Authorization: Bearer <token>`, `Accept: application/json`,
//!   `User-Agent`
//! - A body is only sent for `POST` and `PUT`. [`RequestBody::Raw`] goes out
//!   verbatim; [`RequestBody::Json`] is serialized and tagged
//!   `application/json; charset=utf-8`
//!
//! ## Response rules
//!
//! - Non-2xx status: [`ApiError::Http`], body not read
//! - `content-type` containing `application/json`: parsed JSON
//! - Anything else, including a missing header: raw text
//!
//! ## Certificate validation
//!
//! Each request carries a [`TlsPolicy`]. Requests with
//! [`TlsPolicy::AcceptInvalidCerts`] go through a second transport that skips
//! certificate checks; it is built on first use and never shared with verified
//! requests, so concurrent calls with different policies do not affect each
//! other.

use once_cell::sync::OnceCell;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use super::common::{ApiError, ApiResponse, ResponseKind};
use crate::auth::{request_token, AuthToken, Credentials};

/// User-Agent sent when the caller does not supply one.
pub const DEFAULT_USER_AGENT: &str = "CIT Cloud Team Automation";

/// Content type attached to JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Certificate validation policy for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsPolicy {
    /// Validate server certificates (default)
    #[default]
    Verify,
    /// Accept self-signed and otherwise invalid certificates
    AcceptInvalidCerts,
}

impl TlsPolicy {
    /// Maps an `ignore_ssl_errors` flag to a policy.
    pub fn from_ignore_ssl_errors(ignore_ssl_errors: bool) -> Self {
        if ignore_ssl_errors {
            Self::AcceptInvalidCerts
        } else {
            Self::Verify
        }
    }
}

/// A request body, typed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent exactly as given; no content type is added
    Raw(String),
    /// Serialized to JSON and sent with [`JSON_CONTENT_TYPE`]
    Json(Value),
}

impl RequestBody {
    /// Builds a JSON body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        Self::Raw(body)
    }
}

impl From<&str> for RequestBody {
    fn from(body: &str) -> Self {
        Self::Raw(body.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(body: Value) -> Self {
        Self::Json(body)
    }
}

/// A body ready to be put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBody {
    /// Content type to set, if the wrapper adds one
    pub content_type: Option<&'static str>,
    /// The bytes to send, as text
    pub payload: String,
}

/// Applies the body rule for `method`.
///
/// Returns `None` unless the method is `POST` or `PUT` and a body is present.
///
/// # Example
///
/// ```rust
/// use reqwest::Method;
/// use serde_json::json;
/// use tdx_cli::api::client::{encode_body, RequestBody};
///
/// let body = RequestBody::Json(json!({"a": 1}));
/// let encoded = encode_body(&Method::POST, Some(&body)).unwrap().unwrap();
/// assert_eq!(encoded.payload, r#"{"a":1}"#);
///
/// assert!(encode_body(&Method::GET, Some(&body)).unwrap().is_none());
/// ```
pub fn encode_body(
    method: &Method,
    body: Option<&RequestBody>,
) -> Result<Option<EncodedBody>, ApiError> {
    if *method != Method::POST && *method != Method::PUT {
        return Ok(None);
    }

    match body {
        None => Ok(None),
        Some(RequestBody::Raw(text)) => Ok(Some(EncodedBody {
            content_type: None,
            payload: text.clone(),
        })),
        Some(RequestBody::Json(value)) => Ok(Some(EncodedBody {
            content_type: Some(JSON_CONTENT_TYPE),
            payload: serde_json::to_string(value)?,
        })),
    }
}

/// Parses a method name, upper-casing it first.
///
/// # Example
///
/// ```rust
/// use reqwest::Method;
/// use tdx_cli::api::client::parse_method;
///
/// assert_eq!(parse_method("get").unwrap(), Method::GET);
/// assert!(parse_method("NOT A METHOD").is_err());
/// ```
pub fn parse_method(method: &str) -> Result<Method, ApiError> {
    Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| ApiError::InvalidMethod(method.to_string()))
}

/// One authenticated call to the TDX API.
///
/// Built fresh per call with the builder methods below. The method defaults
/// to `OPTIONS` and the TLS policy to [`TlsPolicy::Verify`].
///
/// # Example
///
/// ```rust
/// use reqwest::Method;
/// use serde_json::json;
/// use tdx_cli::api::client::{ApiCallRequest, TlsPolicy};
/// use tdx_cli::auth::AuthToken;
///
/// let token = AuthToken::new("T");
/// let request = ApiCallRequest::new("/99/tickets/search", &token)
///     .method(Method::POST)
///     .json_body(json!({"searchText": "vpn"}))
///     .ignore_ssl_errors(true);
///
/// assert_eq!(request.tls_policy(), TlsPolicy::AcceptInvalidCerts);
/// ```
#[derive(Debug, Clone)]
pub struct ApiCallRequest {
    endpoint_path: String,
    auth_token: AuthToken,
    method: Method,
    body: Option<RequestBody>,
    tls: TlsPolicy,
    user_agent: Option<String>,
}

impl ApiCallRequest {
    pub fn new(endpoint_path: impl Into<String>, auth_token: &AuthToken) -> Self {
        Self {
            endpoint_path: endpoint_path.into(),
            auth_token: auth_token.clone(),
            method: Method::OPTIONS,
            body: None,
            tls: TlsPolicy::Verify,
            user_agent: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json_body(self, body: Value) -> Self {
        self.body(RequestBody::Json(body))
    }

    pub fn raw_body(self, body: impl Into<String>) -> Self {
        self.body(RequestBody::Raw(body.into()))
    }

    pub fn tls(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }

    pub fn ignore_ssl_errors(self, ignore_ssl_errors: bool) -> Self {
        self.tls(TlsPolicy::from_ignore_ssl_errors(ignore_ssl_errors))
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    pub fn http_method(&self) -> &Method {
        &self.method
    }

    pub fn tls_policy(&self) -> TlsPolicy {
        self.tls
    }
}

/// The HTTP client for the TeamDynamix Web API.
///
/// Holds the API base URL, the default User-Agent and the underlying
/// transports. Cloning is cheap; the transports are reference counted.
///
/// # Example
///
/// ```rust,no_run
/// use reqwest::Method;
/// use tdx_cli::api::{ApiCallRequest, TdxClient};
///
/// # async fn example() -> Result<(), tdx_cli::api::ApiError> {
/// let client = TdxClient::new("https://tdx.your.domain/TDWebApi/api")?;
/// let token = client.get_auth_token("user", "pass").await?;
///
/// let people = client
///     .make_api_call(
///         ApiCallRequest::new("/people/lookup?searchText=", &token).method(Method::GET),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TdxClient {
    /// Transport for verified requests
    http: Client,
    /// Transport that skips certificate validation, built on first use
    insecure_http: OnceCell<Client>,
    /// API base URL, e.g. `https://tdx.your.domain/TDWebApi/api`
    api_base_url: String,
    /// User-Agent for requests that do not override it
    user_agent: String,
    /// TLS policy for requests issued by the ticket helpers
    tls: TlsPolicy,
}

impl TdxClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ApiError> {
        let api_base_url = api_base_url.into();
        tracing::debug!("Creating TdxClient with base URL: {}", api_base_url);

        Ok(Self {
            http: Client::builder().build()?,
            insecure_http: OnceCell::new(),
            api_base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls: TlsPolicy::Verify,
        })
    }

    /// Sets the default User-Agent for this client.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the TLS policy used by [`get_auth_token`](Self::get_auth_token),
    /// [`get_ticket`](Self::get_ticket),
    /// [`search_tickets`](Self::search_tickets) and
    /// [`create_ticket`](Self::create_ticket). Requests passed to
    /// [`make_api_call`](Self::make_api_call) carry their own policy.
    pub fn with_tls_policy(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }

    pub fn tls_policy(&self) -> TlsPolicy {
        self.tls
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn transport(&self, tls: TlsPolicy) -> Result<&Client, ApiError> {
        match tls {
            TlsPolicy::Verify => Ok(&self.http),
            TlsPolicy::AcceptInvalidCerts => {
                tracing::warn!("Certificate validation disabled for this request");
                let client = self.insecure_http.get_or_try_init(|| {
                    Client::builder().danger_accept_invalid_certs(true).build()
                })?;
                Ok(client)
            }
        }
    }

    /// Retrieves an auth token using this client's base URL, User-Agent and
    /// TLS policy.
    ///
    /// See [`get_auth_token`](crate::auth::get_auth_token) for the contract.
    pub async fn get_auth_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, ApiError> {
        let credentials = Credentials::new(username, password, self.api_base_url.clone())
            .with_user_agent(self.user_agent.clone());
        request_token(self.transport(self.tls)?, &credentials).await
    }

    /// Makes one authenticated call to the TDX API.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] for a non-2xx status
    /// - [`ApiError::Network`] for transport failures
    /// - [`ApiError::Decode`] when a JSON-typed body does not parse
    pub async fn make_api_call(&self, request: ApiCallRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.api_base_url, request.endpoint_path);
        let user_agent = request.user_agent.as_deref().unwrap_or(&self.user_agent);

        tracing::debug!(
            "Sending {} request to {} (tls: {:?})",
            request.method,
            url,
            request.tls
        );

        let mut builder = self
            .transport(request.tls)?
            .request(request.method.clone(), &url)
            .bearer_auth(request.auth_token.as_str())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, user_agent);

        if let Some(encoded) = encode_body(&request.method, request.body.as_ref())? {
            if let Some(content_type) = encoded.content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
            builder = builder.body(encoded.payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Received response with status: {}", status);

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let text = response.text().await?;
        match ResponseKind::classify(&content_type) {
            ResponseKind::Json => Ok(ApiResponse::Json(serde_json::from_str(&text)?)),
            ResponseKind::Text => Ok(ApiResponse::Text(text)),
        }
    }

    #[cfg(test)]
    pub(crate) fn has_insecure_transport(&self) -> bool {
        self.insecure_http.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_json_body_for_post_and_put() {
        let body = RequestBody::Json(json!({"a": 1}));
        for method in [Method::POST, Method::PUT] {
            let encoded = encode_body(&method, Some(&body)).unwrap().unwrap();
            assert_eq!(encoded.content_type, Some(JSON_CONTENT_TYPE));
            assert_eq!(encoded.payload, serde_json::to_string(&json!({"a": 1})).unwrap());
        }
    }

    #[test]
    fn test_encode_json_body_keeps_key_order() {
        let value: Value =
            serde_json::from_str(r#"{"Title":"Disk full","AccountID":3,"Description":"d"}"#)
                .unwrap();
        let encoded = encode_body(&Method::POST, Some(&RequestBody::Json(value)))
            .unwrap()
            .unwrap();
        assert_eq!(
            encoded.payload,
            r#"{"Title":"Disk full","AccountID":3,"Description":"d"}"#
        );
    }

    #[test]
    fn test_encode_raw_body_verbatim() {
        let body = RequestBody::Raw("raw-string".into());
        let encoded = encode_body(&Method::PUT, Some(&body)).unwrap().unwrap();
        assert_eq!(encoded.content_type, None);
        assert_eq!(encoded.payload, "raw-string");
    }

    #[test]
    fn test_body_dropped_for_other_methods() {
        let body = RequestBody::Json(json!({"a": 1}));
        for method in [Method::GET, Method::OPTIONS, Method::DELETE, Method::PATCH] {
            assert!(encode_body(&method, Some(&body)).unwrap().is_none());
        }
        assert!(encode_body(&Method::POST, None).unwrap().is_none());
    }

    #[test]
    fn test_parse_method_uppercases() {
        assert_eq!(parse_method("post").unwrap(), Method::POST);
        assert_eq!(parse_method("Options").unwrap(), Method::OPTIONS);
        assert!(matches!(
            parse_method("bad method"),
            Err(ApiError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_request_defaults() {
        let token = AuthToken::new("T");
        let request = ApiCallRequest::new("/x", &token);
        assert_eq!(request.http_method(), &Method::OPTIONS);
        assert_eq!(request.tls_policy(), TlsPolicy::Verify);
        assert_eq!(request.endpoint_path(), "/x");
    }

    #[test]
    fn test_request_body_conversions() {
        assert_eq!(RequestBody::from("s"), RequestBody::Raw("s".into()));
        assert_eq!(
            RequestBody::from(json!({"k": "v"})),
            RequestBody::Json(json!({"k": "v"}))
        );
        assert_eq!(
            RequestBody::json(&vec![1, 2]).unwrap(),
            RequestBody::Json(json!([1, 2]))
        );
    }

    #[tokio::test]
    async fn test_verified_call_never_builds_insecure_transport() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/plain")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("ok")
            .create_async()
            .await;

        let client = TdxClient::new(server.url()).unwrap();
        let token = AuthToken::new("T");
        let result = client
            .make_api_call(ApiCallRequest::new("/plain", &token).method(Method::GET))
            .await
            .unwrap();

        assert_eq!(result, ApiResponse::Text("ok".into()));
        assert!(!client.has_insecure_transport());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insecure_call_is_scoped_to_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("OPTIONS", "/ssl")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("ok")
            .expect(2)
            .create_async()
            .await;

        let client = TdxClient::new(server.url()).unwrap();
        let token = AuthToken::new("T");

        let insecure = client
            .make_api_call(ApiCallRequest::new("/ssl", &token).ignore_ssl_errors(true))
            .await
            .unwrap();
        assert_eq!(insecure, ApiResponse::Text("ok".into()));
        assert!(client.has_insecure_transport());

        // A verified request afterwards still goes through the verifying transport.
        let verified = client
            .make_api_call(ApiCallRequest::new("/ssl", &token))
            .await
            .unwrap();
        assert_eq!(verified, ApiResponse::Text("ok".into()));
        assert!(std::ptr::eq(
            client.transport(TlsPolicy::Verify).unwrap(),
            &client.http
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insecure_call_error_path_leaves_verified_transport() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("OPTIONS", "/ssl")
            .with_status(500)
            .create_async()
            .await;

        let client = TdxClient::new(server.url()).unwrap();
        let token = AuthToken::new("T");
        let err = client
            .make_api_call(ApiCallRequest::new("/ssl", &token).ignore_ssl_errors(true))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(std::ptr::eq(
            client.transport(TlsPolicy::Verify).unwrap(),
            &client.http
        ));
    }
}
