//
//  tdx-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! TDX tokens are short-lived and are never stored; every command logs in
//! again. These commands expose that login directly.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::OutputWriter;

use super::{GlobalOptions, Session};

/// Authenticate with TeamDynamix.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and print a fresh bearer token
    Token,

    /// Check that the configured credentials can log in
    Status,
}

#[derive(Serialize)]
struct AuthStatus<'a> {
    api_base_url: &'a str,
    username: &'a str,
    authenticated: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Token => token(global).await,
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn token(global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global).await?;
    println!("{}", session.token.as_str());
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global).await?;
    let writer = OutputWriter::from_flag(global.json);
    let username = session.ctx.username.as_deref().unwrap_or_default();

    if global.json {
        crate::output::write_json(&AuthStatus {
            api_base_url: &session.ctx.api_base_url,
            username,
            authenticated: true,
        })?;
    } else {
        writer.write_success(&format!(
            "Logged in to {} as {}",
            session.ctx.api_base_url, username
        ));
    }
    Ok(())
}
