//
//  tdx-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for the few values the CLI may ask for:
//! the login password and the fields of a new ticket.
//!
//! # Example
//!
//! ```no_run
//! use tdx_cli::interactive::prompt::{prompt_confirm, prompt_input, prompt_password};
//!
//! let title = prompt_input("Title").unwrap();
//! let password = prompt_password("Password for svc-automation").unwrap();
//!
//! if prompt_confirm("Create ticket?").unwrap() {
//!     println!("Creating {}", title);
//! }
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for a non-empty line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for optional text; an empty answer gives `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input))
    }
}

/// Prompts for a password without echoing it.
///
/// The password is returned as a plain `String`; it is only ever passed on to
/// `/auth/login`.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Asks a yes/no question, defaulting to yes.
pub fn prompt_confirm(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}
