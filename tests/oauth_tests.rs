//! Integration tests for the OAuth token flows.

use std::sync::Arc;

use etsy_api::auth::oauth::{OAuthError, TokenManager};
use etsy_api::clients::HttpClient;
use etsy_api::{ClientId, EndpointUrl, EtsyConfig, PermissionScopes};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/v3/public/oauth/token";

fn manager(server: &MockServer) -> TokenManager {
    let config = EtsyConfig::builder()
        .client_id(ClientId::new("test-keystring").unwrap())
        .token_url(EndpointUrl::new(format!("{}{TOKEN_PATH}", server.uri())).unwrap())
        .build()
        .unwrap();
    TokenManager::new(&config, Arc::new(HttpClient::new(Some(&config))))
}

fn token_body() -> serde_json::Value {
    json!({
        "access_token": "12345.new-access",
        "refresh_token": "12345.new-refresh",
        "token_type": "Bearer",
        "expires_in": 3600
    })
}

#[tokio::test]
async fn test_authorization_code_exchange_posts_pkce_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=test-keystring"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("code_verifier=the-verifier"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let pair = manager(&server)
        .exchange_authorization_code("https://app.example.com/callback", "auth-code", "the-verifier")
        .await
        .unwrap();

    assert_eq!(pair.access_token, "12345.new-access");
    assert_eq!(pair.refresh_token, "12345.new-refresh");
    assert!(pair.expires_at.is_some());
    assert!(!pair.expired());
    assert_eq!(pair.api_key().unwrap().user_id(), 12345);
}

#[tokio::test]
async fn test_refresh_posts_refresh_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=12345.old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let pair = manager(&server)
        .refresh_access_token("12345.old-refresh")
        .await
        .unwrap();

    assert_eq!(pair.access_token, "12345.new-access");
}

#[tokio::test]
async fn test_legacy_exchange_posts_token_exchange_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=token_exchange"))
        .and(body_string_contains("legacy_token=oauth1-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let pair = manager(&server)
        .exchange_legacy_token("oauth1-token")
        .await
        .unwrap();

    assert_eq!(pair.refresh_token, "12345.new-refresh");
}

#[tokio::test]
async fn test_token_error_carries_provider_error_and_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "code has expired"
        })))
        .mount(&server)
        .await;

    let error = manager(&server)
        .refresh_access_token("12345.stale")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        OAuthError::TokenRequestFailed { status: 400, ref error, .. } if error == "invalid_grant"
    ));
    assert_eq!(
        error.to_string(),
        "Received HTTP status code [400] with error \"invalid_grant\" and message \"code has expired\" when requesting access token."
    );
}

#[tokio::test]
async fn test_token_error_without_json_uses_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let error = manager(&server)
        .exchange_legacy_token("oauth1-token")
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Received HTTP status code [502] with error \"Bad Gateway\" when requesting access token."
    );
}

#[tokio::test]
async fn test_success_without_tokens_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let error = manager(&server)
        .refresh_access_token("12345.r")
        .await
        .unwrap_err();

    assert!(matches!(error, OAuthError::InvalidTokenResponse { status: 200, .. }));
}

#[test]
fn test_begin_authorization_builds_connect_url() {
    let config = EtsyConfig::builder()
        .client_id(ClientId::new("test-keystring").unwrap())
        .build()
        .unwrap();
    let tokens = TokenManager::new(&config, Arc::new(HttpClient::new(Some(&config))));
    let scopes: PermissionScopes = "listings_r shops_r".parse().unwrap();

    let request = tokens
        .begin_authorization("https://app.example.com/callback", &scopes)
        .unwrap();

    assert!(request.url.starts_with("https://www.etsy.com/oauth/connect/?response_type=code&"));
    assert!(request.url.contains("scope=listings_r%20shops_r"));
    assert!(request.url.contains("client_id=test-keystring"));
    assert!(request.url.contains(&format!("state={}", request.state)));
    assert!(request.url.ends_with("&code_challenge_method=S256"));
    assert_eq!(request.state.len(), 24);
    assert!(request.verifier.len() >= 43);
}
