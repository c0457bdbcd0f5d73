//
//  tdx-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one authenticated request through the TDX Web API, for endpoints no
//! other command covers.
//!
//! ## Examples
//!
//! ```bash
//! # Look up a person
//! tdx api "/people/lookup?searchText=jdoe"
//!
//! # Update a ticket with fields (JSON body)
//! tdx api -X POST /99/tickets/12345 -F StatusID=5 -F Comments="Closing"
//!
//! # Send a file as the body; non-JSON content is sent verbatim
//! tdx api -X PUT /99/tickets/12345/feed --input update.json
//!
//! # Save the response
//! tdx api /99/tickets/12345 --output ticket.json
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::{Map, Value};

use crate::api::client::parse_method;
use crate::api::{ApiCallRequest, RequestBody};
use crate::output::{write_data_as_json_file, OutputWriter};

use super::{GlobalOptions, Session};

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API endpoint path, appended to the API base URL (e.g. /99/tickets/123)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE, OPTIONS)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request body fields with typed values (key=value, nested with dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Request body fields sent as strings (key=value)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read the request body from a file (- for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Write the response to a JSON file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method = parse_method(&self.method)?;
        let body = self.build_body()?;

        let session = Session::open(global).await?;
        let mut request = ApiCallRequest::new(self.endpoint.clone(), &session.token)
            .method(method)
            .tls(session.ctx.tls);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = session.client.make_api_call(request).await?;

        match &self.output {
            Some(path) => {
                write_data_as_json_file(&response, path)?;
                OutputWriter::from_flag(global.json).write_success(&format!("Saved response to {}", path));
            }
            None => OutputWriter::from_flag(global.json).write_response(&response)?,
        }

        Ok(())
    }

    fn build_body(&self) -> Result<Option<RequestBody>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(Some(body_from_input(content)));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();

        for field in &self.field {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut body, &key, value);
        }

        for field in &self.raw_field {
            let (key, value) = parse_raw_field(field)?;
            set_nested_value(&mut body, &key, Value::String(value));
        }

        Ok(Some(RequestBody::Json(Value::Object(body))))
    }
}

/// JSON input becomes a JSON body; anything else is sent verbatim.
fn body_from_input(content: String) -> RequestBody {
    match serde_json::from_str::<Value>(&content) {
        Ok(value) => RequestBody::Json(value),
        Err(_) => RequestBody::Raw(content),
    }
}

fn parse_field(field: &str) -> Result<(String, Value)> {
    let (key, value_str) = parse_raw_field(field)?;

    let value = if value_str == "true" {
        Value::Bool(true)
    } else if value_str == "false" {
        Value::Bool(false)
    } else if value_str == "null" {
        Value::Null
    } else if let Ok(n) = value_str.parse::<i64>() {
        Value::Number(n.into())
    } else if let Ok(n) = value_str.parse::<f64>() {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value_str.clone()))
    } else if value_str.starts_with('[') || value_str.starts_with('{') {
        serde_json::from_str(&value_str).unwrap_or_else(|_| Value::String(value_str.clone()))
    } else {
        Value::String(value_str)
    };

    Ok((key, value))
}

fn parse_raw_field(field: &str) -> Result<(String, String)> {
    match field.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_types() {
        assert_eq!(parse_field("a=5").unwrap(), ("a".into(), json!(5)));
        assert_eq!(parse_field("a=true").unwrap(), ("a".into(), json!(true)));
        assert_eq!(parse_field("a=null").unwrap(), ("a".into(), Value::Null));
        assert_eq!(parse_field("a=1.5").unwrap(), ("a".into(), json!(1.5)));
        assert_eq!(parse_field("a=[1,2]").unwrap(), ("a".into(), json!([1, 2])));
        assert_eq!(parse_field("a=x=y").unwrap(), ("a".into(), json!("x=y")));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_raw_field_keeps_strings() {
        assert_eq!(
            parse_raw_field("StatusID=5").unwrap(),
            ("StatusID".to_string(), "5".to_string())
        );
    }

    #[test]
    fn test_set_nested_value() {
        let mut body = Map::new();
        set_nested_value(&mut body, "Attributes.Name", json!("Priority"));
        set_nested_value(&mut body, "Attributes.Value", json!(3));
        set_nested_value(&mut body, "Title", json!("VPN down"));
        assert_eq!(
            Value::Object(body),
            json!({"Attributes": {"Name": "Priority", "Value": 3}, "Title": "VPN down"})
        );
    }

    #[test]
    fn test_body_from_input() {
        assert_eq!(
            body_from_input("{\"Title\": \"x\"}".to_string()),
            RequestBody::Json(json!({"Title": "x"}))
        );
        assert_eq!(
            body_from_input("plain text".to_string()),
            RequestBody::Raw("plain text".to_string())
        );
    }

    #[test]
    fn test_build_body_from_fields() {
        let command = ApiCommand {
            endpoint: "/99/tickets/1".into(),
            method: "POST".into(),
            field: vec!["StatusID=5".into()],
            raw_field: vec!["Comments=42".into()],
            input: None,
            output: None,
        };
        assert_eq!(
            command.build_body().unwrap(),
            Some(RequestBody::Json(json!({"StatusID": 5, "Comments": "42"})))
        );
    }

    #[test]
    fn test_build_body_empty() {
        let command = ApiCommand {
            endpoint: "/99/tickets/1".into(),
            method: "GET".into(),
            field: vec![],
            raw_field: vec![],
            input: None,
            output: None,
        };
        assert_eq!(command.build_body().unwrap(), None);
    }
}
