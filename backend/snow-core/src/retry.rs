//! Bounded HTTP retry client.
//!
//! Wraps a single HTTP call in a fixed-count, fixed-delay retry loop:
//! up to 3 attempts with a constant 5 second pause between them. Each
//! attempt resolves to an explicit outcome; no error is raised until
//! the attempt budget is spent, at which point the last attempt's
//! status, headers and body travel with the fatal error.

use crate::error::request::{FailureDetail, RequestError};

use common::HttpStatusCode;

use std::time::Duration;

use backoff::backoff::{Backoff, Constant};
use log::{info, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

/// Total attempts per request, including the first one.
const MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between attempts. No jitter, no exponential growth.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request payload variants the ServiceNow endpoints accept.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// URL-encoded form string (token endpoint).
    Form(String),
    /// JSON document (CR create/patch).
    Json(Value),
}

/// Outcome of one attempt. Expected failures are data, not exceptions.
enum AttemptOutcome {
    Success(Value),
    Failure(FailureDetail),
}

#[derive(Clone)]
pub struct RetryClient {
    client: Client,
    retry_delay: Duration,
}

impl RetryClient {
    pub fn new() -> Result<Self, RequestError> {
        Self::with_retry_delay(DEFAULT_RETRY_DELAY)
    }

    /// Build a client with a non-default pause between attempts.
    pub fn with_retry_delay(retry_delay: Duration) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()
            .map_err(|e| RequestError::build(e.to_string()))?;

        Ok(Self {
            client,
            retry_delay,
        })
    }

    /// Issue `method url` with up to [`MAX_ATTEMPTS`] attempts.
    ///
    /// Any response with status >= 400, or a transport-level failure,
    /// counts as a failed attempt. On success the body is parsed as
    /// JSON; the parsed shape is the caller's responsibility. A 2xx
    /// body that is not valid JSON resolves to `Value::Null` with a
    /// warning rather than an error, so callers treat it the same as
    /// a response missing the expected fields.
    pub async fn request_with_retry(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<RequestBody>,
    ) -> Result<Value, RequestError> {
        let url = Url::parse(url)?;
        let mut backoff = Constant::new(self.retry_delay);
        let mut last_failure = FailureDetail::transport("no attempt was made");

        for attempt in 1..=MAX_ATTEMPTS {
            match self.single_attempt(&method, &url, &headers, body.as_ref()).await {
                AttemptOutcome::Success(value) => return Ok(value),
                AttemptOutcome::Failure(failure) => {
                    last_failure = failure;
                    if attempt < MAX_ATTEMPTS {
                        info!(
                            "Retrying API - {method} operation for URL - {url} (attempt {attempt} of {MAX_ATTEMPTS})"
                        );
                        if let Some(delay) = backoff.next_backoff() {
                            TokioSleep(delay).await;
                        }
                    }
                }
            }
        }

        warn!("Maximum retries exceeded, exiting..");
        Err(RequestError::retries_exhausted(
            method.as_str(),
            url.as_str(),
            last_failure,
        ))
    }

    async fn single_attempt(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: Option<&RequestBody>,
    ) -> AttemptOutcome {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers.clone());

        request = match body {
            Some(RequestBody::Form(form)) => request
                .header(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED))
                .body(form.clone()),
            Some(RequestBody::Json(json)) => request.json(json),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                return AttemptOutcome::Failure(FailureDetail::transport(error.to_string()));
            }
        };

        let status = HttpStatusCode(response.status().as_u16());
        if status.is_failure() {
            return AttemptOutcome::Failure(failure_detail(status, response).await);
        }

        let raw = response.text().await.unwrap_or_default();
        match serde_json::from_str(&raw) {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) => {
                warn!("Response from {url} is not valid JSON: {error}");
                AttemptOutcome::Success(Value::Null)
            }
        }
    }
}

async fn failure_detail(status: HttpStatusCode, response: Response) -> FailureDetail {
    let headers = format!("{:?}", response.headers());
    let body = response.text().await.unwrap_or_default();
    FailureDetail {
        status: Some(status),
        headers,
        body,
    }
}
