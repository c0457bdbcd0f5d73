//
//  tdx-cli
//  cli/uri.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Translate API resource URIs into browser links

use anyhow::{bail, Result};
use clap::Args;

use crate::api::links::tdx_api_uri_to_app_url;
use crate::config::Config;
use crate::context::ContextResolver;

use super::GlobalOptions;

/// Print the web app URL for a TDX API URI
#[derive(Args, Debug)]
pub struct UriCommand {
    /// API URI, e.g. api/99/tickets/12345
    pub uri: String,
}

impl UriCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let app_base_url = ContextResolver::new(Config::load()?).app_base_url(global)?;

        let url = tdx_api_uri_to_app_url(&self.uri, &app_base_url);
        if url.is_empty() {
            bail!("No ticket or knowledge-base path in '{}'", self.uri);
        }

        if global.json {
            let result = serde_json::json!({
                "uri": self.uri,
                "url": url,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", url);
        }

        Ok(())
    }
}
