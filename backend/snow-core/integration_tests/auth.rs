// Integration tests for token acquisition against a wiremock token
// endpoint.

use snow_core::auth::get_token;
use snow_core::context::{CrContext, keys};
use snow_core::error::auth::AuthError;
use snow_core::error::context::ContextError;
use snow_core::retry::RetryClient;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_context(server_uri: &str) -> CrContext {
    let mut context = CrContext::new();
    context.insert(keys::URL, format!("{server_uri}/api/now/change"));
    context.insert(keys::AUTH_GRANT_TYPE, "password");
    context.insert(keys::AUTH_CLIENT_ID, "client-id");
    context.insert(keys::AUTH_CLIENT_SECRET, "s3cr&t");
    context.insert(keys::AUTH_USERNAME, "svc-user");
    context.insert(keys::AUTH_PASSWORD, "pw");
    context
}

fn test_client() -> RetryClient {
    RetryClient::with_retry_delay(Duration::from_millis(5)).expect("client builds")
}

/// **VALUE**: The token POST goes to the derived `/oauth_token.do`
/// endpoint as a URL-encoded form, and the reply becomes a usable
/// bearer token.
#[tokio::test]
async fn given_valid_credentials_when_get_token_then_token_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth_token.do"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=s3cr%26t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": "abc123",
            "expires_in": 1799
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = get_token(&test_client(), &auth_context(&server.uri()))
        .await
        .expect("token is issued");

    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.access_token, "abc123");
    assert_eq!(token.authorization_header(), "Bearer abc123");
}

/// **VALUE**: A missing credential key is a configuration error naming
/// the key; no request is made at all.
#[tokio::test]
async fn given_missing_credential_when_get_token_then_config_error_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth_token.do"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut context = CrContext::new();
    context.insert(keys::URL, format!("{}/api/now/change", server.uri()));
    context.insert(keys::AUTH_GRANT_TYPE, "password");

    let error = get_token(&test_client(), &context).await.unwrap_err();

    match error {
        AuthError::Context(ContextError::MissingKey { key, .. }) => {
            assert_eq!(key, "auth_client_id");
        }
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

/// A 2xx token response without an access token is unusable and must
/// name the missing field.
#[tokio::test]
async fn given_token_response_without_access_token_when_get_token_then_names_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth_token.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .expect(1)
        .mount(&server)
        .await;

    let error = get_token(&test_client(), &auth_context(&server.uri()))
        .await
        .unwrap_err();

    match error {
        AuthError::TokenResponse { field, .. } => assert_eq!(field, "access_token"),
        other => panic!("expected TokenResponse, got {other:?}"),
    }
}
