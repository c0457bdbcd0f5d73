//
//  tdx-cli
//  api/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API URI to Web URL Translation
//!
//! TDX API responses carry resource paths such as `api/99/tickets/123` in
//! their `Uri` fields. This module maps those to the pages a person opens in a
//! browser. Two resource kinds are recognized: tickets and knowledge-base
//! articles.
//!
//! | Resource | Web URL |
//! |----------|---------|
//! | `api/<app>/tickets/<id>` | `<base>/<app>/Tickets/TicketDet.aspx?TicketID=<id>` |
//! | `api/<app>/knowledgebase/<id>` | `<base with TDNext/Apps → TDClient>/<app>/Portal/KB/ArticleDet?ID=<id>` |

use once_cell::sync::Lazy;
use regex::Regex;

static API_URI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"api/([0-9]+)/(tickets|knowledgebase)/([0-9]+)").unwrap());

/// Path segment of the agent-facing app base URL.
const TDNEXT_APPS: &str = "TDNext/Apps";

/// Path segment of the client portal that hosts knowledge-base articles.
const TDCLIENT: &str = "TDClient";

/// A TDX resource that has a browser-facing page.
///
/// Ids are kept exactly as they appear in the URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLink {
    /// A ticket in a ticketing application
    Ticket {
        /// Application id
        app_id: String,
        /// Ticket id
        id: String,
    },
    /// A knowledge-base article
    KnowledgeBaseArticle {
        /// Application id
        app_id: String,
        /// Article id
        id: String,
    },
}

impl AppLink {
    /// Finds the first recognized resource path anywhere in `uri`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tdx_cli::api::links::AppLink;
    ///
    /// let link = AppLink::parse("https://tdx/TDWebApi/api/99/tickets/123").unwrap();
    /// assert_eq!(link, AppLink::Ticket { app_id: "99".into(), id: "123".into() });
    ///
    /// assert!(AppLink::parse("api/99/assets/1").is_none());
    /// ```
    pub fn parse(uri: &str) -> Option<Self> {
        let caps = API_URI_PATTERN.captures(uri)?;
        let app_id = caps[1].to_string();
        let id = caps[3].to_string();

        match &caps[2] {
            "tickets" => Some(Self::Ticket { app_id, id }),
            "knowledgebase" => Some(Self::KnowledgeBaseArticle { app_id, id }),
            _ => None,
        }
    }

    /// Builds the web URL for this resource under `app_base_url`.
    ///
    /// For knowledge-base articles the first `TDNext/Apps` in the base is
    /// replaced by `TDClient`. A base without that segment is used unchanged.
    pub fn to_app_url(&self, app_base_url: &str) -> String {
        match self {
            Self::Ticket { app_id, id } => {
                format!("{app_base_url}/{app_id}/Tickets/TicketDet.aspx?TicketID={id}")
            }
            Self::KnowledgeBaseArticle { app_id, id } => {
                let portal_base = app_base_url.replacen(TDNEXT_APPS, TDCLIENT, 1);
                format!("{portal_base}/{app_id}/Portal/KB/ArticleDet?ID={id}")
            }
        }
    }
}

/// Translates a TDX API resource URI into a browser-facing URL.
///
/// Returns an empty string when `uri` contains no ticket or knowledge-base
/// path.
///
/// # Example
///
/// ```rust
/// use tdx_cli::api::links::tdx_api_uri_to_app_url;
///
/// let url = tdx_api_uri_to_app_url("api/99/tickets/123", "https://app/TDNext/Apps");
/// assert_eq!(url, "https://app/TDNext/Apps/99/Tickets/TicketDet.aspx?TicketID=123");
///
/// assert_eq!(tdx_api_uri_to_app_url("api/x/unknown/1", "https://app"), "");
/// ```
pub fn tdx_api_uri_to_app_url(uri: &str, app_base_url: &str) -> String {
    AppLink::parse(uri)
        .map(|link| link.to_app_url(app_base_url))
        .unwrap_or_default()
}
