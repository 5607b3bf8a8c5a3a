//! Error types for the HTTP retry client.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - The last failed attempt's status/headers/body travel with the error
//! - All errors include ErrorLocation for debugging

use common::{ErrorLocation, HttpStatusCode};

use std::fmt;
use std::panic::Location;

use thiserror::Error as ThisError;

/// What the last failed attempt looked like.
///
/// `status` is `None` when the failure happened below HTTP (timeout,
/// connection refused) and no response was received.
#[derive(Debug, Clone)]
pub struct FailureDetail {
    pub status: Option<HttpStatusCode>,
    pub headers: String,
    pub body: String,
}

impl FailureDetail {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: String::new(),
            body: message.into(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "Status: {}, Headers: {}, Error Response: {}",
                status, self.headers, self.body
            ),
            None => write!(f, "Transport error: {}", self.body),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum RequestError {
    /// The request could not be constructed at all (bad URL, bad
    /// header value). Never retried.
    #[error("Request Build Error: {message} {location}")]
    Build {
        message: String,
        location: ErrorLocation,
    },

    /// Every attempt failed; carries the last attempt's detail.
    #[error("Maximum retries exceeded for {method} {url}: {detail} {location}")]
    RetriesExhausted {
        method: String,
        url: String,
        detail: FailureDetail,
        location: ErrorLocation,
    },
}

impl RequestError {
    #[track_caller]
    pub fn build(message: impl Into<String>) -> Self {
        RequestError::Build {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn retries_exhausted(
        method: impl Into<String>,
        url: impl Into<String>,
        detail: FailureDetail,
    ) -> Self {
        RequestError::RetriesExhausted {
            method: method.into(),
            url: url.into(),
            detail,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Status code of the last failed attempt, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::RetriesExhausted { detail, .. } => {
                detail.status.map(|status| status.0)
            }
            RequestError::Build { .. } => None,
        }
    }
}

impl From<url::ParseError> for RequestError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        RequestError::Build {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
