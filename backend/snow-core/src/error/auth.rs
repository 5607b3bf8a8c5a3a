use crate::error::context::ContextError;
use crate::error::request::RequestError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// The token endpoint answered 2xx but the body is missing (or has
    /// an empty) required field.
    #[error("Token response missing field '{field}' {location}")]
    TokenResponse {
        field: &'static str,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn token_response(field: &'static str) -> Self {
        AuthError::TokenResponse {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
