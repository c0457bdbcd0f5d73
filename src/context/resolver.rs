//
//  tdx-cli
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connection Context Resolver
//!
//! Merges [`GlobalOptions`] with the loaded [`Config`]. Flags win over the
//! config file; clap has already folded the `TDX_*` environment variables into
//! the flags. TLS validation is bypassed when either `--insecure` is passed or
//! `ignore_ssl_errors` is set in the config.

use anyhow::{bail, Context, Result};

use super::ConnectionContext;
use crate::api::{TlsPolicy, DEFAULT_USER_AGENT};
use crate::auth::Credentials;
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::interactive::prompt::prompt_password;

pub struct ContextResolver {
    config: Config,
}

impl ContextResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves connection settings for a command.
    ///
    /// # Errors
    ///
    /// Fails when no API base URL is available from any source.
    pub fn resolve(&self, options: &GlobalOptions) -> Result<ConnectionContext> {
        let tdx = &self.config.tdx;

        let api_base_url = options
            .api_base_url
            .clone()
            .or_else(|| tdx.api_base_url.clone())
            .context(
                "No API base URL. Use --api-base-url, set TDX_API_BASE_URL, or run 'tdx config set api_base_url <URL>'",
            )?;

        let tls = if options.insecure {
            TlsPolicy::AcceptInvalidCerts
        } else {
            TlsPolicy::from_ignore_ssl_errors(tdx.ignore_ssl_errors)
        };

        Ok(ConnectionContext {
            api_base_url,
            app_base_url: options.app_base_url.clone().or_else(|| tdx.app_base_url.clone()),
            app_id: options.app_id.or(tdx.app_id),
            username: options.username.clone().or_else(|| tdx.username.clone()),
            user_agent: options
                .user_agent
                .clone()
                .or_else(|| tdx.user_agent.clone())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            tls,
        })
    }

    /// Resolves the web app base URL alone, for commands that only build links.
    pub fn app_base_url(&self, options: &GlobalOptions) -> Result<String> {
        options
            .app_base_url
            .clone()
            .or_else(|| self.config.tdx.app_base_url.clone())
            .context(
                "No app base URL. Use --app-base-url, set TDX_APP_BASE_URL, or run 'tdx config set app_base_url <URL>'",
            )
    }

    /// Resolves the application id alone, for commands that only build links.
    pub fn app_id(&self, options: &GlobalOptions) -> Result<u64> {
        options.app_id.or(self.config.tdx.app_id).context(
            "No application id. Use --app-id, set TDX_APP_ID, or run 'tdx config set app_id <ID>'",
        )
    }

    /// Builds login credentials for `ctx`.
    ///
    /// The password comes from `--password`/`TDX_PASSWORD`; otherwise the user
    /// is prompted, unless prompting is disabled.
    pub fn credentials(
        &self,
        ctx: &ConnectionContext,
        options: &GlobalOptions,
    ) -> Result<Credentials> {
        let username = ctx.username.clone().context(
            "No username. Use --username, set TDX_USERNAME, or run 'tdx config set username <NAME>'",
        )?;

        let password = match &options.password {
            Some(password) => password.clone(),
            None if options.no_prompt => {
                bail!("No password. Use --password or set TDX_PASSWORD")
            }
            None => prompt_password(&format!("Password for {}", username))?,
        };

        Ok(Credentials::new(username, password, ctx.api_base_url.clone())
            .with_user_agent(ctx.user_agent.clone()))
    }
}
