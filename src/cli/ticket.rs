//
//  tdx-cli
//  cli/ticket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Ticket commands
//!
//! View, search and create tickets in a TDX ticketing application, and build
//! browser links to them.
//!
//! ## Examples
//!
//! ```bash
//! tdx ticket view 12345
//! tdx ticket search "vpn" --limit 5
//! tdx ticket create --from-defaults --title "Disk full on web01"
//! tdx ticket open 12345
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::links::{tdx_api_uri_to_app_url, AppLink};
use crate::api::{get_cloud_team_ticket_defaults, ApiResponse, TicketSearch};
use crate::config::Config;
use crate::context::ContextResolver;
use crate::interactive::prompt::{prompt_confirm, prompt_input, prompt_input_optional};
use crate::output::{print_field, write_data_as_json_file, OutputWriter};

use super::{GlobalOptions, Session};

/// Work with tickets
#[derive(Args, Debug)]
pub struct TicketCommand {
    #[command(subcommand)]
    pub command: TicketSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TicketSubcommand {
    /// View a ticket
    View(ViewArgs),

    /// Search tickets
    Search(SearchArgs),

    /// Create a ticket
    Create(CreateArgs),

    /// Show the Cloud Team's new-ticket defaults
    Defaults(DefaultsArgs),

    /// Open a ticket in the browser
    Open(LinkArgs),

    /// Print a ticket's browser URL
    Link(LinkArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Ticket ID
    pub id: u64,

    /// Write the ticket to a JSON file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub text: String,

    /// Maximum number of results
    #[arg(long, short = 'L', default_value_t = crate::api::tickets::DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,

    /// Write the results to a JSON file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Read ticket fields from a JSON file
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Start from the Cloud Team's new-ticket defaults
    #[arg(long)]
    pub from_defaults: bool,

    /// URL of the defaults document
    #[arg(long, requires = "from_defaults")]
    pub defaults_url: Option<String>,

    /// Ticket title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Ticket description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Write the created ticket to a JSON file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// URL of the defaults document
    #[arg(long)]
    pub url: Option<String>,

    /// Write the defaults to a JSON file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Ticket ID
    pub id: u64,
}

impl TicketCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            TicketSubcommand::View(args) => self.view(args, global).await,
            TicketSubcommand::Search(args) => self.search(args, global).await,
            TicketSubcommand::Create(args) => self.create(args, global).await,
            TicketSubcommand::Defaults(args) => self.defaults(args, global).await,
            TicketSubcommand::Open(args) => self.open(args, global),
            TicketSubcommand::Link(args) => self.link(args, global),
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global).await?;
        let app_id = session.ctx.require_app_id()?;
        let response = session
            .client
            .get_ticket(&session.token, app_id, args.id)
            .await?;

        if let Some(path) = &args.output {
            return save(&response, path, global);
        }

        let writer = OutputWriter::from_flag(global.json);
        match (&response, global.json) {
            (ApiResponse::Json(ticket), false) => {
                let color = console::colors_enabled();
                print_ticket_summary(ticket, session.ctx.app_base_url.as_deref(), color);
                Ok(())
            }
            _ => writer.write_response(&response),
        }
    }

    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global).await?;
        let search = TicketSearch::new(
            args.text.clone(),
            session.ctx.require_app_id()?,
            session.ctx.require_app_base_url()?,
        )
        .with_limit(args.limit);

        let results = session.client.search_tickets(&session.token, &search).await?;

        if let Some(path) = &args.output {
            return save(&results, path, global);
        }

        OutputWriter::from_flag(global.json).write_list(&results)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let defaults = if args.from_defaults {
            let defaults = get_cloud_team_ticket_defaults(args.defaults_url.as_deref()).await?;
            Some(serde_json::to_value(defaults)?)
        } else {
            None
        };

        let input: Option<Value> = match &args.input {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path))?;
                let value = serde_json::from_str(&content)
                    .with_context(|| format!("{} is not valid JSON", path))?;
                Some(value)
            }
            None => None,
        };

        let mut title = args.title.clone();
        let mut description = args.description.clone();
        let has_title = title.is_some()
            || [&defaults, &input]
                .iter()
                .any(|source| matches!(source, Some(Value::Object(map)) if map.contains_key("Title")));

        if !has_title {
            if global.no_prompt {
                bail!("Ticket title is required. Use --title, --input or --from-defaults");
            }
            title = Some(prompt_input("Ticket title")?);
            if description.is_none() {
                description = prompt_input_optional("Description (optional)")?;
            }
        }

        let ticket_data = build_ticket_data(defaults, input, title, description)?;

        if !args.yes && !global.no_prompt {
            let summary = ticket_data
                .get("Title")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !prompt_confirm(&format!("Create ticket '{}'?", summary))? {
                bail!("Cancelled");
            }
        }

        let session = Session::open(global).await?;
        let app_id = session.ctx.require_app_id()?;
        let response = session
            .client
            .create_ticket(&session.token, app_id, ticket_data)
            .await?;

        if let Some(path) = &args.output {
            return save(&response, path, global);
        }

        let writer = OutputWriter::from_flag(global.json);
        if global.json {
            return writer.write_response(&response);
        }

        let id = response
            .as_json()
            .and_then(|ticket| ticket.get("ID"))
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string());
        writer.write_success(&format!("Created ticket #{}", style(&id).cyan().bold()));

        if let (Some(ticket), Some(base)) = (response.as_json(), session.ctx.app_base_url.as_deref()) {
            let uri = ticket.get("Uri").and_then(Value::as_str).unwrap_or_default();
            let url = tdx_api_uri_to_app_url(uri, base);
            if !url.is_empty() {
                println!("  URL: {}", url);
            }
        }

        Ok(())
    }

    async fn defaults(&self, args: &DefaultsArgs, global: &GlobalOptions) -> Result<()> {
        let defaults = get_cloud_team_ticket_defaults(args.url.as_deref()).await?;

        if let Some(path) = &args.output {
            return save(&defaults, path, global);
        }

        OutputWriter::from_flag(global.json).write(&defaults)
    }

    fn open(&self, args: &LinkArgs, global: &GlobalOptions) -> Result<()> {
        let url = resolve_ticket_url(global, args.id)?;
        println!("{} Opening ticket #{} in browser...", style("→").cyan(), args.id);
        webbrowser::open(&url)?;
        Ok(())
    }

    fn link(&self, args: &LinkArgs, global: &GlobalOptions) -> Result<()> {
        let url = resolve_ticket_url(global, args.id)?;
        println!("{}", url);
        Ok(())
    }
}

fn resolve_ticket_url(global: &GlobalOptions, id: u64) -> Result<String> {
    let resolver = ContextResolver::new(Config::load()?);
    Ok(ticket_url(&resolver.app_base_url(global)?, resolver.app_id(global)?, id))
}

fn ticket_url(app_base_url: &str, app_id: u64, id: u64) -> String {
    AppLink::Ticket {
        app_id: app_id.to_string(),
        id: id.to_string(),
    }
    .to_app_url(app_base_url)
}

fn save<T: Serialize + ?Sized>(data: &T, path: &str, global: &GlobalOptions) -> Result<()> {
    write_data_as_json_file(data, path)?;
    if !global.json {
        OutputWriter::from_flag(false).write_success(&format!("Saved to {}", path));
    }
    Ok(())
}

/// Merges ticket sources into one request body.
///
/// Later sources win: defaults, then the input file, then `--title` and
/// `--description`.
fn build_ticket_data(
    defaults: Option<Value>,
    input: Option<Value>,
    title: Option<String>,
    description: Option<String>,
) -> Result<Value> {
    let mut ticket = Map::new();

    for source in [defaults, input].into_iter().flatten() {
        match source {
            Value::Object(fields) => ticket.extend(fields),
            other => bail!("Ticket data must be a JSON object, got {}", other),
        }
    }

    if let Some(title) = title {
        ticket.insert("Title".to_string(), Value::String(title));
    }
    if let Some(description) = description {
        ticket.insert("Description".to_string(), Value::String(description));
    }

    Ok(Value::Object(ticket))
}

const SUMMARY_FIELDS: [(&str, &str); 8] = [
    ("ID", "ID"),
    ("Title", "Title"),
    ("Status", "StatusName"),
    ("Priority", "PriorityName"),
    ("Type", "TypeName"),
    ("Requestor", "RequestorName"),
    ("Responsible", "ResponsibleGroupName"),
    ("Modified", "ModifiedDate"),
];

fn print_ticket_summary(ticket: &Value, app_base_url: Option<&str>, color: bool) {
    for (label, key) in SUMMARY_FIELDS {
        let value = match ticket.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        };
        print_field(label, &value, color);
    }

    if let Some(base) = app_base_url {
        let uri = ticket.get("Uri").and_then(Value::as_str).unwrap_or_default();
        let url = tdx_api_uri_to_app_url(uri, base);
        if !url.is_empty() {
            print_field("URL", &url, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_ticket_data_precedence() {
        let data = build_ticket_data(
            Some(json!({"TypeID": 1, "Title": "default", "Description": "default"})),
            Some(json!({"TypeID": 2, "Title": "from file"})),
            Some("from flag".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(
            data,
            json!({"TypeID": 2, "Title": "from flag", "Description": "default"})
        );
    }

    #[test]
    fn test_build_ticket_data_rejects_non_object() {
        assert!(build_ticket_data(None, Some(json!([1, 2])), None, None).is_err());
    }

    #[test]
    fn test_ticket_url() {
        assert_eq!(
            ticket_url("https://tdx.test/TDNext/Apps", 99, 123),
            "https://tdx.test/TDNext/Apps/99/Tickets/TicketDet.aspx?TicketID=123"
        );
    }

    #[test]
    fn test_print_summary_handles_missing_fields() {
        print_ticket_summary(&json!({"ID": 1, "Title": null}), None, false);
    }
}
