use crate::error::context::ContextError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Template lookup failures are data errors, fatal immediately and
/// never retried.
#[derive(Debug, ThisError)]
pub enum TemplateError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("WebSite '{site}' is not defined in the plan template {location}")]
    SiteNotDefined {
        site: String,
        location: ErrorLocation,
    },

    #[error("Failed to read plan template {path}: {source} {location}")]
    Read {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse plan template {path}: {reason} {location}")]
    Parse {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Plan template entry for '{site}' is malformed: {reason} {location}")]
    Malformed {
        site: String,
        reason: String,
        location: ErrorLocation,
    },
}

impl TemplateError {
    #[track_caller]
    pub fn site_not_defined(site: impl Into<String>) -> Self {
        TemplateError::SiteNotDefined {
            site: site.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplateError::Read {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TemplateError::Parse {
            path: path.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(site: impl Into<String>, reason: impl Into<String>) -> Self {
        TemplateError::Malformed {
            site: site.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
