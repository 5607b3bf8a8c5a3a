use crate::error::context::ContextError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MailError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Mail Address Error: {message} {location}")]
    Address {
        message: String,
        location: ErrorLocation,
    },

    #[error("Mail Compose Error: {message} {location}")]
    Compose {
        message: String,
        location: ErrorLocation,
    },

    #[error("Mail Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read log file {path}: {source} {location}")]
    LogRead {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },
}

impl MailError {
    #[track_caller]
    pub fn log_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MailError::LogRead {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

impl From<lettre::address::AddressError> for MailError {
    #[track_caller]
    fn from(error: lettre::address::AddressError) -> Self {
        MailError::Address {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<lettre::error::Error> for MailError {
    #[track_caller]
    fn from(error: lettre::error::Error) -> Self {
        MailError::Compose {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    #[track_caller]
    fn from(error: lettre::transport::smtp::Error) -> Self {
        MailError::Transport {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
