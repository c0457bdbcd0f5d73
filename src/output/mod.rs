//
//  tdx-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `tdx` CLI:
//!
//! - **Table format**: human-readable tables and field listings
//! - **JSON format**: machine-readable JSON for scripting
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization to stdout, writers and files
//!
//! [`OutputWriter`] picks the format; [`TableOutput`] and [`TableRow`] let a
//! type describe how it looks in table mode.

mod json;
pub mod table;

pub use json::*;

use serde::Serialize;
use serde_json::Value;

use crate::api::tickets::{NewTicketDefaults, TicketSearchResult};
use crate::api::ApiResponse;
use table::{format_status, truncate, TableBuilder};

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and field listings
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Selects JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values)?,
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results");
                    return Ok(());
                }
                let mut builder = TableBuilder::new().color(self.color).headers(T::headers());
                for value in values {
                    builder = builder.row(value.row(self.color));
                }
                builder.print();
            }
        }
        Ok(())
    }

    /// Prints an API response: JSON pretty-printed, text as received.
    pub fn write_response(&self, response: &ApiResponse) -> anyhow::Result<()> {
        match response {
            ApiResponse::Json(value) => write_json(value)?,
            ApiResponse::Text(text) => println!("{}", text),
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that render themselves as a field listing.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Types that render as one row of a table.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;

    fn row(&self, color: bool) -> Vec<String>;
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

impl TableRow for TicketSearchResult {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Title", "Status", "Priority", "Requestor", "Link"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            cell_text(&self.id),
            truncate(&cell_text(&self.title), 50),
            format_status(&cell_text(&self.status_name), color),
            cell_text(&self.priority_name),
            cell_text(&self.requestor_name),
            self.uri.clone(),
        ]
    }
}

/// Strings print bare; other JSON values print as JSON; null is blank.
fn cell_text(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl TableOutput for NewTicketDefaults {
    fn print_table(&self, color: bool) {
        print_field("Title", &self.title, color);
        print_field("Description", &self.description, color);
        print_field("TypeID", &self.type_id.to_string(), color);
        print_field("TypeCategoryID", &self.type_category_id.to_string(), color);
        print_field("AccountID", &self.account_id.to_string(), color);
        print_field("StatusID", &self.status_id.to_string(), color);
        print_field("PriorityID", &self.priority_id.to_string(), color);
        print_field("Classification", &self.classification.to_string(), color);
        print_field("ResponsibleGroupID", &self.responsible_group_id.to_string(), color);
        print_field("ServiceID", &self.service_id.to_string(), color);
        print_field("ServiceCategoryID", &self.service_category_id.to_string(), color);
        print_field("ServiceOfferingID", &self.service_offering_id.to_string(), color);
        print_field("SourceID", &self.source_id.to_string(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_row() {
        let result = TicketSearchResult {
            id: Some(json!(7)),
            title: Some(json!("Printer on fire")),
            status_name: Some(json!("Open")),
            priority_name: Some(Value::Null),
            uri: "https://app/99/Tickets/TicketDet.aspx?TicketID=7".into(),
            ..Default::default()
        };
        let row = result.row(false);
        assert_eq!(row.len(), TicketSearchResult::headers().len());
        assert_eq!(row[0], "7");
        assert_eq!(row[2], "Open");
        assert_eq!(row[3], "");
        assert_eq!(row[5], result.uri);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(OutputWriter::from_flag(true).format(), OutputFormat::Json);
        assert_eq!(OutputWriter::from_flag(false).format(), OutputFormat::Table);
    }
}
