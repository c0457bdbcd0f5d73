//
//  tdx-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connection Context Module
//!
//! Works out which TDX instance a command talks to, and as whom.
//!
//! ## Overview
//!
//! Settings come from three places, highest priority first:
//!
//! 1. CLI flags and their `TDX_*` environment variables
//! 2. The configuration file (see [`crate::config`])
//! 3. Built-in defaults (the User-Agent only)
//!
//! [`ContextResolver`] merges these into a [`ConnectionContext`], and produces
//! [`Credentials`](crate::auth::Credentials) on demand, prompting for the
//! password when allowed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tdx_cli::cli::GlobalOptions;
//! use tdx_cli::config::Config;
//! use tdx_cli::context::ContextResolver;
//!
//! let resolver = ContextResolver::new(Config::load()?);
//! let ctx = resolver.resolve(&GlobalOptions::default())?;
//! let client = ctx.client()?;
//! println!("Talking to {}", client.api_base_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod resolver;

pub use resolver::*;

use anyhow::{Context, Result};

use crate::api::{TdxClient, TlsPolicy};

/// Resolved connection settings for one CLI invocation.
///
/// Only `api_base_url` is mandatory; commands that need an application id or
/// the web app base URL ask for them with [`require_app_id`](Self::require_app_id)
/// and [`require_app_base_url`](Self::require_app_base_url), which fail with a
/// hint naming the flag and config key to set.
///
/// ```rust
/// use tdx_cli::api::TlsPolicy;
/// use tdx_cli::context::ConnectionContext;
///
/// let ctx = ConnectionContext {
///     api_base_url: "https://tdx.test/TDWebApi/api".to_string(),
///     app_base_url: None,
///     app_id: Some(99),
///     username: None,
///     user_agent: "CIT Cloud Team Automation".to_string(),
///     tls: TlsPolicy::Verify,
/// };
///
/// assert_eq!(ctx.require_app_id().unwrap(), 99);
/// assert!(ctx.require_app_base_url().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionContext {
    /// Web API base URL
    pub api_base_url: String,
    /// Web app base URL, used to build links
    pub app_base_url: Option<String>,
    /// Ticketing application id
    pub app_id: Option<u64>,
    /// Username for `/auth/login`
    pub username: Option<String>,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Certificate validation policy for API calls
    pub tls: TlsPolicy,
}

impl ConnectionContext {
    /// Builds a [`TdxClient`] for these settings.
    pub fn client(&self) -> Result<TdxClient> {
        let client = TdxClient::new(self.api_base_url.clone())
            .context("Failed to create HTTP client")?
            .with_user_agent(self.user_agent.clone())
            .with_tls_policy(self.tls);
        Ok(client)
    }

    pub fn require_app_id(&self) -> Result<u64> {
        self.app_id.context(
            "No application id. Use --app-id, set TDX_APP_ID, or run 'tdx config set app_id <ID>'",
        )
    }

    pub fn require_app_base_url(&self) -> Result<&str> {
        self.app_base_url.as_deref().context(
            "No app base URL. Use --app-base-url, set TDX_APP_BASE_URL, or run 'tdx config set app_base_url <URL>'",
        )
    }
}
