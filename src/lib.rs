//
//  tdx-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TDX CLI Library
//!
//! A client library and command-line tool for the TeamDynamix (TDX) Web API.
//!
//! ## Overview
//!
//! The library logs in to a TDX instance, makes authenticated API calls, and
//! turns API resource URIs into links to the TDX web app. The `tdx` binary
//! wraps the same operations for scripts and terminals.
//!
//! ## Features
//!
//! - **Token acquisition**: one POST to `/auth/login`, no caching
//! - **API calls**: typed request bodies and responses decoded by content type
//! - **Per-request TLS policy**: certificate validation can be skipped for a
//!   single call without touching any other request
//! - **Ticket helpers**: view, search, create and the Cloud Team defaults
//! - **Links**: API URIs translated to ticket and knowledge-base pages
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client, links and ticket helpers
//! - [`auth`]: Credentials, tokens and the login request
//! - [`config`]: Configuration file management
//! - [`context`]: Merges flags, environment and config into connection settings
//! - [`output`]: Output formatting (Table, JSON) and the JSON file writer
//! - [`interactive`]: Interactive prompts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tdx_cli::api::{ApiCallRequest, Method, TdxClient};
//!
//! # async fn example() -> Result<(), tdx_cli::api::ApiError> {
//! let client = TdxClient::new("https://tdx.your.domain/TDWebApi/api")?;
//! let token = client.get_auth_token("svc-automation", "secret").await?;
//!
//! let ticket = client
//!     .make_api_call(ApiCallRequest::new("/99/tickets/12345", &token).method(Method::GET))
//!     .await?;
//! println!("{:?}", ticket.as_json());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// TDX API client.
///
/// - [`TdxClient`](api::TdxClient) with `make_api_call`
/// - Response classification and the error type
/// - API URI to web app URL translation
/// - Ticket helpers
pub mod api;

/// Credentials, tokens and the login request.
pub mod auth;

/// Configuration file management.
pub mod config;

/// Connection settings resolution.
pub mod context;

/// Output formatting.
///
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
/// - JSON files: [`write_data_as_json_file`](output::write_data_as_json_file)
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

pub use api::{ApiError, ApiResponse, TdxClient};
pub use auth::{get_auth_token, AuthToken, Credentials};
pub use cli::Cli;
pub use config::Config;
pub use context::ConnectionContext;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "tdx";

/// Application version constant.
///
/// ```rust
/// use tdx_cli::VERSION;
///
/// println!("tdx version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1`: General error
/// - `2`: Invalid arguments, reported by clap before any command runs
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
///
/// # Example
///
/// ```rust,no_run
/// use tdx_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Login failed, or the API answered 401/403.
    pub const AUTH_ERROR: i32 = 4;

    /// The API answered 404.
    pub const NOT_FOUND: i32 = 8;

    /// Maps an error to an exit code by its HTTP status, if it has one.
    ///
    /// ```rust
    /// use tdx_cli::{exit_codes, ApiError};
    ///
    /// let err = anyhow::Error::new(ApiError::Http { status: 404 });
    /// assert_eq!(exit_codes::for_error(&err), exit_codes::NOT_FOUND);
    /// assert_eq!(exit_codes::for_error(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    /// ```
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err
            .downcast_ref::<crate::api::ApiError>()
            .and_then(|e| e.status())
        {
            Some(401) | Some(403) => AUTH_ERROR,
            Some(404) => NOT_FOUND,
            _ => ERROR,
        }
    }
}
