// Integration tests for the ServiceNow client against wiremock.
//
// These also pin the intentional soft-failure edge: a 2xx response
// without the expected `result`/`status` shape is a no-op, not an
// error.

use snow_core::auth::Token;
use snow_core::context::{CrContext, keys};
use snow_core::retry::RetryClient;
use snow_core::snow_client::ServiceNowClient;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bearer_token() -> Token {
    Token {
        token_type: "Bearer".to_owned(),
        access_token: "abc123".to_owned(),
    }
}

fn client_for(server_uri: &str) -> ServiceNowClient {
    let retry = RetryClient::with_retry_delay(Duration::from_millis(5)).expect("client builds");
    let api_url = format!("{server_uri}/api/change");
    ServiceNowClient::new(retry, &api_url, &bearer_token()).expect("client builds")
}

fn create_context() -> CrContext {
    let mut context = CrContext::new();
    context.insert(keys::PROJECT_NAME, "storefront");
    context.insert(keys::AUTH_USERNAME, "svc-user");
    context.insert(keys::CR_CMDB_CI, "CI1");
    context.insert(keys::CR_DURATION, "180");
    context.insert(keys::CR_START_DATE, "2026-08-25T00:00:00Z");
    context.insert(keys::CR_TYPE, "standard");
    context.insert(keys::CR_STATE, "scheduled");
    context.insert(keys::CR_IMPLEMENTATION_PLAN, "install");
    context.insert(keys::CR_TEST_PLAN, "test");
    context.insert(keys::CR_BACKOUT_PLAN, "rollback");
    context
}

/// **VALUE**: A success body yields the record id; the bearer header
/// rides on the request.
#[tokio::test]
async fn given_success_response_when_create_change_request_then_record_id_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/change"))
        .and(header("authorization", "Bearer abc123"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "success", "record_id": "CHG123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cr_number = client_for(&server.uri())
        .create_change_request(&create_context())
        .await
        .expect("request succeeds");

    assert_eq!(cr_number.as_deref(), Some("CHG123"));
}

/// **VALUE**: Pins the preserved silent-failure pair: a reported
/// failure and an absent `result` key both come back as `None` without
/// an error.
#[tokio::test]
async fn given_failed_or_shapeless_response_when_create_change_request_then_none() {
    for body in [json!({"result": {"status": "failed"}}), json!({"outcome": "ok"})] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/change"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let cr_number = client_for(&server.uri())
            .create_change_request(&create_context())
            .await
            .expect("soft failure is not an error");

        assert_eq!(cr_number, None);
    }
}

/// **VALUE**: The implement transition is a PATCH to
/// `.../number/{cr_number}` carrying only the state field.
#[tokio::test]
async fn given_state_change_when_update_change_request_then_patches_number_url() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/change/number/CHG123"))
        .and(header("authorization", "Bearer abc123"))
        .and(body_json(json!({"state": "implement"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = CrContext::new();
    context.insert(keys::CR_NUMBER, "CHG123");
    context.insert(keys::CR_STATE, "implement");

    let implemented = client_for(&server.uri())
        .update_change_request(&context)
        .await
        .expect("request succeeds");

    assert!(implemented);
}

#[tokio::test]
async fn given_unsuccessful_status_when_update_change_request_then_false() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/change/number/CHG123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "pending"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = CrContext::new();
    context.insert(keys::CR_NUMBER, "CHG123");
    context.insert(keys::CR_STATE, "implement");

    let implemented = client_for(&server.uri())
        .update_change_request(&context)
        .await
        .expect("soft failure is not an error");

    assert!(!implemented);
}

#[tokio::test]
async fn given_existing_cr_when_get_change_request_then_result_object_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/change/number/CHG123"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"number": "CHG123", "state": "implement"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = CrContext::new();
    context.insert(keys::CR_NUMBER, "CHG123");

    let result = client_for(&server.uri())
        .get_change_request(&context)
        .await
        .expect("request succeeds")
        .expect("result object present");

    assert_eq!(result["state"], "implement");
}

#[tokio::test]
async fn given_response_without_result_when_get_change_request_then_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/change/number/CHG123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = CrContext::new();
    context.insert(keys::CR_NUMBER, "CHG123");

    let result = client_for(&server.uri())
        .get_change_request(&context)
        .await
        .expect("soft failure is not an error");

    assert!(result.is_none());
}

/// The cr_number invariant: patch/get without a number is a
/// configuration error before any request is issued.
#[tokio::test]
async fn given_missing_cr_number_when_get_change_request_then_config_error() {
    let server = MockServer::start().await;

    let error = client_for(&server.uri())
        .get_change_request(&CrContext::new())
        .await
        .unwrap_err();

    assert!(error.to_string().contains("cr_number"));
}
