//
//  tdx-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the TeamDynamix Web API
//!
//! This module provides the types shared by every TDX call: the error type,
//! the decoded response wrapper and the content-type classifier that decides
//! how a response body is decoded.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ApiResponse`] - A response body, either parsed JSON or raw text
//! - [`ResponseKind`] - The decoding decision derived from `content-type`
//!
//! # Example
//!
//! ```rust
//! use tdx_cli::api::common::{ApiError, ApiResponse};
//!
//! fn handle_result(result: Result<ApiResponse, ApiError>) {
//!     match result {
//!         Ok(ApiResponse::Json(value)) => println!("JSON: {}", value),
//!         Ok(ApiResponse::Text(text)) => println!("Text: {}", text),
//!         Err(ApiError::Http { status }) => println!("Request failed with {}", status),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Unified error type for all TeamDynamix API operations.
///
/// No variant is ever retried or recovered from inside the library; every
/// failure is handed back to the caller as-is.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Http` | The server answered with a non-success status |
/// | `Network` | DNS, connection, TLS or other transport failure |
/// | `Decode` | A body declared as JSON could not be parsed |
/// | `InvalidMethod` | A method string is not a valid HTTP method |
///
/// # Example
///
/// ```rust
/// use tdx_cli::api::common::ApiError;
///
/// let err = ApiError::Http { status: 404 };
/// assert_eq!(err.to_string(), "HTTP error! status: 404");
/// assert_eq!(err.status(), Some(404));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The response status was not in the 2xx range.
    ///
    /// The response body is not read when this error is produced.
    #[error("HTTP error! status: {status}")]
    Http {
        /// The numeric HTTP status code
        status: u16,
    },

    /// A network-level error occurred during the request.
    ///
    /// The underlying `reqwest::Error` is kept unchanged as the source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response declared a JSON content type but the body did not parse.
    #[error("Failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The supplied HTTP method string is not a valid method token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// How a successful response body should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Parse the body as JSON
    Json,
    /// Return the body as text
    Text,
}

impl ResponseKind {
    /// Classifies a `content-type` header value.
    ///
    /// The value is matched as received: any value containing the literal
    /// `application/json` is JSON, everything else (including an empty or
    /// missing header) is text. No case folding is applied.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tdx_cli::api::common::ResponseKind;
    ///
    /// assert_eq!(ResponseKind::classify("application/json; charset=utf-8"), ResponseKind::Json);
    /// assert_eq!(ResponseKind::classify("text/plain"), ResponseKind::Text);
    /// assert_eq!(ResponseKind::classify(""), ResponseKind::Text);
    /// ```
    pub fn classify(content_type: &str) -> Self {
        if content_type.contains("application/json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// A decoded TDX API response body.
///
/// No schema is enforced; the JSON variant carries whatever structure the
/// server returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// Body parsed from a JSON content type
    Json(Value),
    /// Raw body text for any other content type
    Text(String),
}

impl ApiResponse {
    /// Returns the JSON value, or `None` for a text response.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text, or `None` for a JSON response.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Consumes the response and returns the JSON value, if any.
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_json_variants() {
        assert_eq!(ResponseKind::classify("application/json"), ResponseKind::Json);
        assert_eq!(
            ResponseKind::classify("application/json; charset=utf-8"),
            ResponseKind::Json
        );
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(ResponseKind::classify("Application/JSON"), ResponseKind::Text);
    }

    #[test]
    fn test_classify_text_and_missing() {
        assert_eq!(ResponseKind::classify("text/plain"), ResponseKind::Text);
        assert_eq!(ResponseKind::classify("text/html; charset=utf-8"), ResponseKind::Text);
        assert_eq!(ResponseKind::classify(""), ResponseKind::Text);
    }

    #[test]
    fn test_http_error_message_names_status() {
        let err = ApiError::Http { status: 500 };
        assert!(err.to_string().contains("HTTP error"));
        assert!(err.to_string().contains("500"));
        assert_eq!(err.status(), Some(500));
        assert_eq!(ApiError::InvalidMethod("G T".into()).status(), None);
    }

    #[test]
    fn test_response_accessors() {
        let json = ApiResponse::Json(json!({"hello": "json"}));
        assert_eq!(json.as_json(), Some(&json!({"hello": "json"})));
        assert_eq!(json.as_text(), None);

        let text = ApiResponse::Text("plain".into());
        assert_eq!(text.as_text(), Some("plain"));
        assert_eq!(text.into_json(), None);
    }
}
