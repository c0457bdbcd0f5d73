//
//  tdx-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod completion;
mod config;
mod ticket;
mod uri;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use ticket::TicketCommand;
pub use uri::UriCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{TdxClient, TlsPolicy};
use crate::auth::AuthToken;
use crate::config::Config;
use crate::context::{ConnectionContext, ContextResolver};
use crate::output::OutputWriter;

/// TDX CLI - Work with TeamDynamix from the command line
#[derive(Parser, Debug)]
#[command(
    name = "tdx",
    version,
    about = "Work with TeamDynamix from the command line",
    long_about = "tdx is a CLI for the TeamDynamix Web API.\n\n\
                  It logs in, calls API endpoints, and works with tickets from your terminal.",
    propagate_version = true,
    after_help = "Use 'tdx <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// TDX Web API base URL (e.g. https://tdx.your.domain/TDWebApi/api)
    #[arg(long, global = true, env = "TDX_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// TDX web app base URL (e.g. https://tdx.your.domain/TDNext/Apps)
    #[arg(long, global = true, env = "TDX_APP_BASE_URL")]
    pub app_base_url: Option<String>,

    /// Ticketing application ID
    #[arg(long, global = true, env = "TDX_APP_ID")]
    pub app_id: Option<u64>,

    /// Username for login
    #[arg(long, short = 'u', global = true, env = "TDX_USERNAME")]
    pub username: Option<String>,

    /// Password for login
    #[arg(long, global = true, env = "TDX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// User-Agent header sent with requests
    #[arg(long, global = true, env = "TDX_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Accept invalid TLS certificates for API calls
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "TDX_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with TeamDynamix
    Auth(AuthCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Work with tickets
    #[command(visible_alias = "t")]
    Ticket(TicketCommand),

    /// Translate an API URI into a web app URL
    Uri(UriCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// A logged-in connection shared by the commands that call the API.
pub(crate) struct Session {
    pub ctx: ConnectionContext,
    pub client: TdxClient,
    pub token: AuthToken,
}

impl Session {
    /// Resolves settings, then logs in once.
    pub async fn open(global: &GlobalOptions) -> Result<Self> {
        let resolver = ContextResolver::new(Config::load()?);
        let ctx = resolver.resolve(global)?;
        let credentials = resolver.credentials(&ctx, global)?;
        let client = ctx.client()?;
        if client.tls_policy() == TlsPolicy::AcceptInvalidCerts {
            OutputWriter::from_flag(global.json)
                .write_warning("Certificate validation is disabled for this session");
        }
        let token = client
            .get_auth_token(&credentials.username, &credentials.password)
            .await?;

        Ok(Self { ctx, client, token })
    }
}
