use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Configuration errors: a required pipeline variable or context key
/// is absent. Always fatal, never retried.
#[derive(Debug, ThisError)]
pub enum ContextError {
    #[error("Required variable '{name}' is not set {location}")]
    MissingVariable {
        name: String,
        location: ErrorLocation,
    },

    #[error("Config key '{key}' does not exist {location}")]
    MissingKey {
        key: String,
        location: ErrorLocation,
    },
}

impl ContextError {
    #[track_caller]
    pub fn missing_variable(name: impl Into<String>) -> Self {
        ContextError::MissingVariable {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_key(key: impl Into<String>) -> Self {
        ContextError::MissingKey {
            key: key.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
