//
//  tdx-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! TeamDynamix authenticates API calls with a bearer token obtained by posting
//! a username and password to `<api base>/auth/login`. This module holds the
//! credential and token types and the login call itself.
//!
//! The token is opaque: it is not parsed, cached, refreshed or expired here.
//! Callers fetch one and hand it to every subsequent request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tdx_cli::auth::{get_auth_token, Credentials};
//!
//! # async fn example() -> Result<(), tdx_cli::api::ApiError> {
//! let credentials = Credentials::new(
//!     "your-username",
//!     "super-secret-string",
//!     "https://tdx.your.domain/TDWebApi/api",
//! );
//! let token = get_auth_token(&credentials).await?;
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::*;

use std::fmt;

use crate::api::client::DEFAULT_USER_AGENT;

/// Username/password pair plus the API it is valid for.
///
/// Credentials are used once per token request and never persisted. The
/// `Debug` output redacts the password.
#[derive(Clone)]
pub struct Credentials {
    /// TDX username
    pub username: String,
    /// TDX password
    pub password: String,
    /// API base URL, e.g. `https://tdx.your.domain/TDWebApi/api`
    pub api_base_url: String,
    /// User-Agent override; [`DEFAULT_USER_AGENT`] when `None`
    pub user_agent: Option<String>,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_base_url: api_base_url.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The User-Agent sent with the login request.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// An opaque TDX bearer token.
///
/// Holds exactly the text the login endpoint returned. There is no `Display`
/// impl and `Debug` is redacted so tokens do not end up in logs by accident;
/// use [`AuthToken::as_str`] when the raw value is needed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_default_user_agent() {
        let creds = Credentials::new("u", "p", "https://x");
        assert_eq!(creds.user_agent(), "CIT Cloud Team Automation");

        let creds = creds.with_user_agent("UA");
        assert_eq!(creds.user_agent(), "UA");
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let creds = Credentials::new("u", "hunter2", "https://x");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("\"u\""));
        assert!(!debug.contains("hunter2"));

        let token = AuthToken::new("SOMETOKEN");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
        assert_eq!(token.as_str(), "SOMETOKEN");
    }
}
