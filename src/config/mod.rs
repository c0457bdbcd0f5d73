//
//  tdx-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `tdx` configuration, a TOML file in the platform
//! configuration directory:
//!
//! - **Linux**: `~/.config/tdx/config.toml`
//! - **macOS**: `~/Library/Application Support/tdx/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\tdx\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [tdx]
//! api_base_url = "https://tdx.your.domain/TDWebApi/api"
//! app_base_url = "https://tdx.your.domain/TDNext/Apps"
//! app_id = 99
//! username = "svc-automation"
//! ignore_ssl_errors = false
//! ```
//!
//! Passwords are never written to this file. Supply them with `--password`,
//! `TDX_PASSWORD` or the interactive prompt.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 6] = [
    "api_base_url",
    "app_base_url",
    "app_id",
    "username",
    "user_agent",
    "ignore_ssl_errors",
];

/// Global configuration container for the TDX CLI.
///
/// # Examples
///
/// ```rust
/// use tdx_cli::config::Config;
///
/// let config = Config::default();
/// assert!(config.tdx.api_base_url.is_none());
/// assert!(!config.tdx.ignore_ssl_errors);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Connection settings for the TDX instance
    #[serde(default)]
    pub tdx: TdxConfig,
}

/// Connection settings for a TeamDynamix instance.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TdxConfig {
    /// Web API base URL, e.g. `https://tdx.your.domain/TDWebApi/api`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Web app base URL used for links, e.g. `https://tdx.your.domain/TDNext/Apps`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_base_url: Option<String>,

    /// Default ticketing application id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u64>,

    /// Username for `/auth/login`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Skip certificate validation for API calls
    #[serde(default)]
    pub ignore_ssl_errors: bool,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path` as pretty TOML.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "tdx")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the keys accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &CONFIG_KEYS
    }

    /// Gets a value by key as a string.
    ///
    /// Returns `None` for unknown keys and unset optional values.
    ///
    /// ```rust
    /// use tdx_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("ignore_ssl_errors"), Some("false".to_string()));
    /// assert_eq!(config.get("username"), None);
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_base_url" => self.tdx.api_base_url.clone(),
            "app_base_url" => self.tdx.app_base_url.clone(),
            "app_id" => self.tdx.app_id.map(|id| id.to_string()),
            "username" => self.tdx.username.clone(),
            "user_agent" => self.tdx.user_agent.clone(),
            "ignore_ssl_errors" => Some(self.tdx.ignore_ssl_errors.to_string()),
            _ => None,
        }
    }

    /// Sets a value by key.
    ///
    /// Returns `Ok(false)` for unknown keys. Values are validated: base URLs
    /// must parse as absolute URLs, `app_id` as an unsigned integer and
    /// `ignore_ssl_errors` as `true`/`false`. Changes are only persisted by
    /// [`Config::save`].
    ///
    /// ```rust
    /// use tdx_cli::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.set("app_id", "99").unwrap());
    /// assert_eq!(config.tdx.app_id, Some(99));
    /// assert!(config.set("app_id", "ninety-nine").is_err());
    /// assert!(!config.set("unknown_key", "value").unwrap());
    /// ```
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "api_base_url" => self.tdx.api_base_url = Some(validate_url(value)?),
            "app_base_url" => self.tdx.app_base_url = Some(validate_url(value)?),
            "app_id" => {
                let id = value
                    .parse::<u64>()
                    .with_context(|| format!("app_id must be a number, got '{}'", value))?;
                self.tdx.app_id = Some(id);
            }
            "username" => self.tdx.username = Some(value.to_string()),
            "user_agent" => self.tdx.user_agent = Some(value.to_string()),
            "ignore_ssl_errors" => {
                self.tdx.ignore_ssl_errors = value.parse::<bool>().with_context(|| {
                    format!("ignore_ssl_errors must be true or false, got '{}'", value)
                })?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Checks that `value` is an absolute http(s) URL and returns it unchanged.
///
/// The value is stored as typed; URLs are later concatenated with endpoint
/// paths, so no normalization happens here.
fn validate_url(value: &str) -> Result<String> {
    let url = url::Url::parse(value).with_context(|| format!("Invalid URL '{}'", value))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        bail!("URL must use http or https: {}", value);
    }
    Ok(value.to_string())
}
