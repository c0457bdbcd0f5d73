//
//  tdx-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the TeamDynamix (TDX) Web API.
//!
//! ## Architecture
//!
//! - [`client`]: Authenticated request wrapper with body encoding, response
//!   decoding and per-request certificate policy
//! - [`common`]: Error type, decoded response type and content-type classifier
//! - [`links`]: Translation of API resource URIs into web app URLs
//! - [`tickets`]: Ticket lookup, search and creation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tdx_cli::api::{ApiCallRequest, Method, TdxClient};
//!
//! # async fn example() -> Result<(), tdx_cli::api::ApiError> {
//! let client = TdxClient::new("https://tdx.your.domain/TDWebApi/api")?;
//! let token = client.get_auth_token("user", "pass").await?;
//!
//! let ticket = client
//!     .make_api_call(ApiCallRequest::new("/99/tickets/123456", &token).method(Method::GET))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Nothing is retried:
//!
//! - `Http`: non-2xx status, with the numeric code
//! - `Network`: transport failure, passed through from `reqwest`
//! - `Decode`: JSON content type with an unparseable body

/// Core HTTP client wrapper for the TDX API.
pub mod client;

/// Types shared by every API operation.
pub mod common;

/// API URI to web URL translation.
pub mod links;

/// Ticket endpoints.
pub mod tickets;

pub use client::{ApiCallRequest, RequestBody, TdxClient, TlsPolicy, DEFAULT_USER_AGENT};
pub use common::{ApiError, ApiResponse, ResponseKind};
pub use links::{tdx_api_uri_to_app_url, AppLink};
pub use reqwest::Method;
pub use tickets::{
    get_cloud_team_ticket_defaults, NewTicketDefaults, TicketSearch, TicketSearchResult,
};
