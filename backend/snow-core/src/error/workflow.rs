use crate::error::auth::AuthError;
use crate::error::context::ContextError;
use crate::error::mail::MailError;
use crate::error::request::RequestError;
use crate::error::snow_client::SnowClientError;
use crate::error::template::TemplateError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum WorkflowError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    SnowClient(#[from] SnowClientError),

    #[error(transparent)]
    Mail(#[from] MailError),

    /// The create call answered 2xx but did not report success, so no
    /// CR number exists and the implement transition is not attempted.
    #[error("Change request creation was not accepted by ServiceNow {location}")]
    CreateRejected { location: ErrorLocation },
}

impl WorkflowError {
    #[track_caller]
    pub fn create_rejected() -> Self {
        WorkflowError::CreateRejected {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
