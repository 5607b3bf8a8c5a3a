// Integration tests for the bounded retry client, against a local
// wiremock server. The retry pause is shrunk so the 3-attempt budget
// plays out in milliseconds; the pause count still has to match.

use snow_core::error::request::RequestError;
use snow_core::retry::{RequestBody, RetryClient};

use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_RETRY_DELAY: Duration = Duration::from_millis(50);

fn test_client() -> RetryClient {
    RetryClient::with_retry_delay(TEST_RETRY_DELAY).expect("client builds")
}

/// **VALUE**: Two failures followed by a success return the 3rd
/// response's body, after exactly two pauses.
///
/// **BUG THIS CATCHES**: An off-by-one in the attempt budget either
/// gives up after the 2nd failure or sleeps a 3rd time for nothing.
#[tokio::test]
async fn given_two_failures_then_success_when_request_with_retry_then_third_body_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/change/number/CHG1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/change/number/CHG1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/api/change/number/CHG1", server.uri());
    let started = Instant::now();

    let body = test_client()
        .request_with_retry(Method::GET, &url, HeaderMap::new(), None)
        .await
        .expect("third attempt succeeds");

    assert_eq!(body["result"]["ok"], true);
    // Two pauses happened, not three.
    let elapsed = started.elapsed();
    assert!(elapsed >= TEST_RETRY_DELAY * 2, "elapsed {elapsed:?}");
    assert!(elapsed < TEST_RETRY_DELAY * 3, "elapsed {elapsed:?}");
}

/// **VALUE**: When all 3 attempts fail, the error carries the last
/// response's status and body - that is all the operator gets to
/// diagnose the step.
#[tokio::test]
async fn given_three_failures_when_request_with_retry_then_fatal_with_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/change"))
        .respond_with(ResponseTemplate::new(500).set_body_string("instance unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/api/change", server.uri());

    let error = test_client()
        .request_with_retry(
            Method::POST,
            &url,
            HeaderMap::new(),
            Some(RequestBody::Json(json!({"state": "scheduled"}))),
        )
        .await
        .unwrap_err();

    match error {
        RequestError::RetriesExhausted { detail, .. } => {
            assert_eq!(detail.status.map(|s| s.0), Some(500));
            assert_eq!(detail.body, "instance unavailable");
            assert!(!detail.headers.is_empty());
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

/// Transport failures (nothing listening) exhaust the budget too, with
/// no status code in the detail.
#[tokio::test]
async fn given_unreachable_host_when_request_with_retry_then_fatal_without_status() {
    let client = RetryClient::with_retry_delay(Duration::from_millis(5)).expect("client builds");

    let error = client
        .request_with_retry(
            Method::GET,
            "http://127.0.0.1:1/api/change",
            HeaderMap::new(),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), None);
}

/// **VALUE**: A 2xx body that is not JSON resolves to `Value::Null`
/// instead of an error; callers treat it like a response missing the
/// expected fields.
#[tokio::test]
async fn given_success_with_invalid_json_when_request_with_retry_then_null_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/change/number/CHG1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/api/change/number/CHG1", server.uri());

    let body = test_client()
        .request_with_retry(Method::GET, &url, HeaderMap::new(), None)
        .await
        .expect("not an error");

    assert!(body.is_null());
}

#[tokio::test]
async fn given_invalid_url_when_request_with_retry_then_build_error_without_attempts() {
    let error = test_client()
        .request_with_retry(Method::GET, "not a url", HeaderMap::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(error, RequestError::Build { .. }));
}
