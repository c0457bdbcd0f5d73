//
//  tdx-cli
//  api/tickets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Ticket Operations
//!
//! Thin calls over [`TdxClient::make_api_call`] for the TDX ticketing
//! endpoints, plus the loader for the Cloud Team's new-ticket defaults.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | [`TdxClient::get_ticket`] | GET | `/{appId}/tickets/{ticketId}` |
//! | [`TdxClient::search_tickets`] | POST | `/{appId}/tickets/search` |
//! | [`TdxClient::create_ticket`] | POST | `/{appId}/tickets?NotifyRequestor=false` |

use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::client::{ApiCallRequest, TdxClient};
use super::common::{ApiError, ApiResponse};
use super::links::tdx_api_uri_to_app_url;
use crate::auth::AuthToken;

/// Published defaults for tickets created by Cloud Team automation.
pub const CLOUD_TEAM_TICKET_DEFAULTS_URL: &str =
    "https://cu-cit-cloud-team.github.io/tdx-playground/automated-ticket-defaults";

/// Number of search results kept when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Parameters for [`TdxClient::search_tickets`].
#[derive(Debug, Clone)]
pub struct TicketSearch {
    /// Free text passed to the TDX search endpoint
    pub search_text: String,
    /// Maximum number of results returned
    pub limit: usize,
    /// Ticketing application id
    pub app_id: u64,
    /// Web app base URL used to translate each result's `Uri`
    pub app_base_url: String,
}

impl TicketSearch {
    pub fn new(search_text: impl Into<String>, app_id: u64, app_base_url: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            app_id,
            app_base_url: app_base_url.into(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One ticket from a search, reduced to the fields worth showing.
///
/// Field names follow the TDX API. Values are copied as the server sent
/// them, whatever their JSON type. `Uri` holds the web URL of the ticket, not
/// the API path the server returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TicketSearchResult {
    #[serde(rename = "ID")]
    pub id: Option<Value>,
    #[serde(rename = "TypeName")]
    pub type_name: Option<Value>,
    #[serde(rename = "TypeCategoryName")]
    pub type_category_name: Option<Value>,
    #[serde(rename = "ClassificationName")]
    pub classification_name: Option<Value>,
    #[serde(rename = "Title")]
    pub title: Option<Value>,
    #[serde(rename = "AccountName")]
    pub account_name: Option<Value>,
    #[serde(rename = "StatusName")]
    pub status_name: Option<Value>,
    #[serde(rename = "PriorityName")]
    pub priority_name: Option<Value>,
    #[serde(rename = "CreatedDate")]
    pub created_date: Option<Value>,
    #[serde(rename = "ModifiedDate")]
    pub modified_date: Option<Value>,
    #[serde(rename = "RequestorName")]
    pub requestor_name: Option<Value>,
    #[serde(rename = "RequestorEmail")]
    pub requestor_email: Option<Value>,
    #[serde(rename = "ResponsibleGroupName")]
    pub responsible_group_name: Option<Value>,
    #[serde(rename = "ServiceName")]
    pub service_name: Option<Value>,
    #[serde(rename = "ServiceOfferingName")]
    pub service_offering_name: Option<Value>,
    #[serde(rename = "ServiceCategoryName")]
    pub service_category_name: Option<Value>,
    #[serde(rename = "Uri")]
    pub uri: String,
}

impl TicketSearchResult {
    /// Projects a raw search hit, translating its `Uri` under `app_base_url`.
    ///
    /// Missing fields come out as `None`; a missing `Uri` translates to an
    /// empty string.
    pub fn from_api_value(ticket: &Value, app_base_url: &str) -> Self {
        let field = |key: &str| ticket.get(key).cloned();
        let uri = ticket.get("Uri").and_then(Value::as_str).unwrap_or_default();

        Self {
            id: field("ID"),
            type_name: field("TypeName"),
            type_category_name: field("TypeCategoryName"),
            classification_name: field("ClassificationName"),
            title: field("Title"),
            account_name: field("AccountName"),
            status_name: field("StatusName"),
            priority_name: field("PriorityName"),
            created_date: field("CreatedDate"),
            modified_date: field("ModifiedDate"),
            requestor_name: field("RequestorName"),
            requestor_email: field("RequestorEmail"),
            responsible_group_name: field("ResponsibleGroupName"),
            service_name: field("ServiceName"),
            service_offering_name: field("ServiceOfferingName"),
            service_category_name: field("ServiceCategoryName"),
            uri: tdx_api_uri_to_app_url(uri, app_base_url),
        }
    }
}

/// Reduces a search response to at most `limit` results, in server order.
///
/// Anything other than a non-empty JSON array yields no results.
pub fn collect_search_results(
    response: &ApiResponse,
    limit: usize,
    app_base_url: &str,
) -> Vec<TicketSearchResult> {
    match response.as_json().and_then(Value::as_array) {
        Some(tickets) if !tickets.is_empty() => tickets
            .iter()
            .take(limit)
            .map(|ticket| TicketSearchResult::from_api_value(ticket, app_base_url))
            .collect(),
        _ => Vec::new(),
    }
}

/// Values required when creating a ticket for the Cloud Team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicketDefaults {
    #[serde(rename = "TypeID")]
    pub type_id: i64,
    #[serde(rename = "TypeCategoryID")]
    pub type_category_id: i64,
    #[serde(rename = "AccountID")]
    pub account_id: i64,
    #[serde(rename = "StatusID")]
    pub status_id: i64,
    #[serde(rename = "PriorityID")]
    pub priority_id: i64,
    #[serde(rename = "Classification")]
    pub classification: i64,
    #[serde(rename = "ResponsibleGroupID")]
    pub responsible_group_id: i64,
    #[serde(rename = "ServiceID")]
    pub service_id: i64,
    #[serde(rename = "ServiceCategoryID")]
    pub service_category_id: i64,
    #[serde(rename = "ServiceOfferingID")]
    pub service_offering_id: i64,
    #[serde(rename = "SourceID")]
    pub source_id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Fetches the Cloud Team's new-ticket defaults.
///
/// The endpoint is public, so no token is sent. `None` uses
/// [`CLOUD_TEAM_TICKET_DEFAULTS_URL`].
///
/// # Errors
///
/// - [`ApiError::Http`] for a non-2xx status
/// - [`ApiError::Network`] for transport failures
/// - [`ApiError::Decode`] when the body is not a defaults document
pub async fn get_cloud_team_ticket_defaults(
    endpoint_url: Option<&str>,
) -> Result<NewTicketDefaults, ApiError> {
    let url = endpoint_url.unwrap_or(CLOUD_TEAM_TICKET_DEFAULTS_URL);
    tracing::debug!("Fetching ticket defaults from {}", url);

    let response = Client::builder()
        .build()?
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
        });
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

impl TdxClient {
    /// Gets an individual ticket.
    pub async fn get_ticket(
        &self,
        auth_token: &AuthToken,
        app_id: u64,
        ticket_id: u64,
    ) -> Result<ApiResponse, ApiError> {
        self.make_api_call(
            ApiCallRequest::new(format!("/{app_id}/tickets/{ticket_id}"), auth_token)
                .method(Method::GET)
                .tls(self.tls_policy()),
        )
        .await
    }

    /// Searches tickets and returns at most `search.limit` reduced results.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tdx_cli::api::{TdxClient, TicketSearch};
    ///
    /// # async fn example() -> Result<(), tdx_cli::api::ApiError> {
    /// let client = TdxClient::new("https://tdx.your.domain/TDWebApi/api")?;
    /// let token = client.get_auth_token("user", "pass").await?;
    ///
    /// let search = TicketSearch::new("vpn", 99, "https://tdx.your.domain/TDNext/Apps")
    ///     .with_limit(10);
    /// for ticket in client.search_tickets(&token, &search).await? {
    ///     println!("{:?} {}", ticket.title, ticket.uri);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_tickets(
        &self,
        auth_token: &AuthToken,
        search: &TicketSearch,
    ) -> Result<Vec<TicketSearchResult>, ApiError> {
        let response = self
            .make_api_call(
                ApiCallRequest::new(format!("/{}/tickets/search", search.app_id), auth_token)
                    .method(Method::POST)
                    .json_body(json!({ "searchText": search.search_text }))
                    .tls(self.tls_policy()),
            )
            .await?;

        Ok(collect_search_results(
            &response,
            search.limit,
            &search.app_base_url,
        ))
    }

    /// Creates a ticket without notifying the requestor.
    pub async fn create_ticket(
        &self,
        auth_token: &AuthToken,
        app_id: u64,
        ticket_data: Value,
    ) -> Result<ApiResponse, ApiError> {
        self.make_api_call(
            ApiCallRequest::new(format!("/{app_id}/tickets?NotifyRequestor=false"), auth_token)
                .method(Method::POST)
                .json_body(ticket_data)
                .tls(self.tls_policy()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_BASE: &str = "https://app.test.com/TDNext/Apps";

    #[test]
    fn test_collect_respects_limit_and_order() {
        let response = ApiResponse::Json(json!([
            {"ID": 1, "Title": "Ticket 1", "Uri": "api/99/tickets/1"},
            {"ID": 2, "Title": "Ticket 2", "Uri": "api/99/tickets/2"},
            {"ID": 3, "Title": "Ticket 3", "Uri": "api/99/tickets/3"},
        ]));

        let results = collect_search_results(&response, 2, APP_BASE);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, Some(json!(1)));
        assert_eq!(results[1].id, Some(json!(2)));
        assert!(results[1].uri.ends_with("TicketID=2"));
    }

    #[test]
    fn test_collect_non_array_is_empty() {
        assert!(collect_search_results(&ApiResponse::Json(Value::Null), 20, APP_BASE).is_empty());
        assert!(collect_search_results(&ApiResponse::Json(json!([])), 20, APP_BASE).is_empty());
        assert!(collect_search_results(&ApiResponse::Json(json!({"ID": 1})), 20, APP_BASE).is_empty());
        assert!(collect_search_results(&ApiResponse::Text("[]".into()), 20, APP_BASE).is_empty());
    }

    #[test]
    fn test_missing_fields_project_to_none() {
        let result = TicketSearchResult::from_api_value(&json!({"Title": "only"}), APP_BASE);
        assert_eq!(result.title, Some(json!("only")));
        assert_eq!(result.id, None);
        assert_eq!(result.uri, "");
    }

    #[test]
    fn test_field_values_keep_their_json_type() {
        let result = TicketSearchResult::from_api_value(
            &json!({
                "ID": "123",
                "Title": 42,
                "StatusName": {"Name": "Open"},
                "PriorityName": null,
                "CreatedDate": 1.5
            }),
            APP_BASE,
        );
        assert_eq!(result.id, Some(json!("123")));
        assert_eq!(result.title, Some(json!(42)));
        assert_eq!(result.status_name, Some(json!({"Name": "Open"})));
        assert_eq!(result.priority_name, Some(Value::Null));
        assert_eq!(result.created_date, Some(json!(1.5)));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ID"], json!("123"));
        assert_eq!(value["CreatedDate"], json!(1.5));
    }

    #[tokio::test]
    async fn test_helpers_use_client_tls_policy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/99/tickets/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;
        let token = AuthToken::new("T");

        let verifying = TdxClient::new(server.url()).unwrap();
        verifying.get_ticket(&token, 99, 1).await.unwrap();
        assert!(!verifying.has_insecure_transport());

        let insecure = TdxClient::new(server.url())
            .unwrap()
            .with_tls_policy(crate::api::TlsPolicy::AcceptInvalidCerts);
        assert!(!insecure.has_insecure_transport());
        insecure.get_ticket(&token, 99, 1).await.unwrap();
        assert!(insecure.has_insecure_transport());
    }

    #[test]
    fn test_search_result_serializes_tdx_names() {
        let result = TicketSearchResult::from_api_value(
            &json!({"ID": 5, "StatusName": "Open", "Uri": "api/99/tickets/5"}),
            APP_BASE,
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ID"], json!(5));
        assert_eq!(value["StatusName"], json!("Open"));
        assert_eq!(value["TypeName"], Value::Null);
        assert_eq!(
            value["Uri"],
            json!("https://app.test.com/TDNext/Apps/99/Tickets/TicketDet.aspx?TicketID=5")
        );
    }

    #[test]
    fn test_ticket_search_defaults() {
        let search = TicketSearch::new("q", 99, APP_BASE);
        assert_eq!(search.limit, DEFAULT_SEARCH_LIMIT);
        assert_eq!(search.with_limit(5).limit, 5);
    }
}
