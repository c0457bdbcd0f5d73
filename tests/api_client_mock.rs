//
//  tdx-cli
//  tests/api_client_mock.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Login and request wrapper behavior against a mock TDX server.

use mockito::Matcher;
use serde_json::json;

use tdx_cli::api::client::JSON_CONTENT_TYPE;
use tdx_cli::api::{ApiCallRequest, ApiError, ApiResponse, Method, TdxClient, DEFAULT_USER_AGENT};
use tdx_cli::auth::{get_auth_token, AuthToken, Credentials};

#[tokio::test]
async fn login_returns_body_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_header("content-type", JSON_CONTENT_TYPE)
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .match_body(Matcher::Json(json!({"UserName": "svc", "Password": "hunter2"})))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("eyJ0eXAiOiJKV1Qi.token")
        .create_async()
        .await;

    let token = get_auth_token(&Credentials::new("svc", "hunter2", server.url()))
        .await
        .unwrap();

    assert_eq!(token.as_str(), "eyJ0eXAiOiJKV1Qi.token");
    mock.assert_async().await;
}

#[tokio::test]
async fn login_uses_custom_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_header("user-agent", "Nightly Sync")
        .with_status(200)
        .with_body("tok")
        .create_async()
        .await;

    let client = TdxClient::new(server.url())
        .unwrap()
        .with_user_agent("Nightly Sync");
    let token = client.get_auth_token("svc", "pw").await.unwrap();

    assert_eq!(token.as_str(), "tok");
    mock.assert_async().await;
}

#[tokio::test]
async fn login_failure_names_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = get_auth_token(&Credentials::new("svc", "wrong", server.url()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("HTTP error! status: 500"));
}

#[tokio::test]
async fn call_sends_standard_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/people/lookup")
        .match_query(Matcher::UrlEncoded("searchText".into(), "jdoe".into()))
        .match_header("authorization", "Bearer T")
        .match_header("accept", "application/json")
        .match_header("user-agent", "Custom")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body("[]")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let token = AuthToken::new("T");
    let result = client
        .make_api_call(
            ApiCallRequest::new("/people/lookup?searchText=jdoe", &token)
                .method(Method::GET)
                .user_agent("Custom"),
        )
        .await
        .unwrap();

    assert_eq!(result, ApiResponse::Json(json!([])));
    mock.assert_async().await;
}

#[tokio::test]
async fn json_content_type_is_parsed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/99/tickets/1")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"ID": 1, "Title": "VPN down"}"#)
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let result = client
        .make_api_call(ApiCallRequest::new("/99/tickets/1", &AuthToken::new("T")).method(Method::GET))
        .await
        .unwrap();

    assert_eq!(result.as_json().unwrap()["Title"], "VPN down");
}

#[tokio::test]
async fn other_content_type_is_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/report")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(r#"{"looks": "like json"}"#)
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let result = client
        .make_api_call(ApiCallRequest::new("/report", &AuthToken::new("T")).method(Method::GET))
        .await
        .unwrap();

    assert_eq!(result, ApiResponse::Text(r#"{"looks": "like json"}"#.into()));
}

#[tokio::test]
async fn missing_content_type_is_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/bare")
        .with_status(200)
        .with_body("plain")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let result = client
        .make_api_call(ApiCallRequest::new("/bare", &AuthToken::new("T")).method(Method::GET))
        .await
        .unwrap();

    assert_eq!(result.as_text(), Some("plain"));
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let err = client
        .make_api_call(ApiCallRequest::new("/broken", &AuthToken::new("T")).method(Method::GET))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/99/tickets/404")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Message": "not found"}"#)
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let err = client
        .make_api_call(ApiCallRequest::new("/99/tickets/404", &AuthToken::new("T")).method(Method::GET))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 404 }));
}

#[tokio::test]
async fn post_json_body_sets_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/99/tickets/search")
        .match_header("content-type", JSON_CONTENT_TYPE)
        .match_body(Matcher::Json(json!({"searchText": "vpn"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    client
        .make_api_call(
            ApiCallRequest::new("/99/tickets/search", &AuthToken::new("T"))
                .method(Method::POST)
                .json_body(json!({"searchText": "vpn"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn put_raw_body_is_sent_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/99/tickets/1/feed")
        .match_header("content-type", Matcher::Missing)
        .match_body(Matcher::Exact("Comments=done".into()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    client
        .make_api_call(
            ApiCallRequest::new("/99/tickets/1/feed", &AuthToken::new("T"))
                .method(Method::PUT)
                .raw_body("Comments=done"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn body_is_dropped_for_get() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/99/tickets/1")
        .match_header("content-type", Matcher::Missing)
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    client
        .make_api_call(
            ApiCallRequest::new("/99/tickets/1", &AuthToken::new("T"))
                .method(Method::GET)
                .json_body(json!({"ignored": true})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn default_method_is_options() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("OPTIONS", "/99/tickets")
        .with_status(204)
        .create_async()
        .await;

    let client = TdxClient::new(server.url()).unwrap();
    let result = client
        .make_api_call(ApiCallRequest::new("/99/tickets", &AuthToken::new("T")))
        .await
        .unwrap();

    assert_eq!(result, ApiResponse::Text(String::new()));
    mock.assert_async().await;
}
