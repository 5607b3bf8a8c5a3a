use common::ErrorLocation;

use snow_core::error::{MailError, WorkflowError};

use thiserror::Error;

/// Top-level error for the pipeline step binary.
///
/// Everything below propagates `Result`; this is the only layer that
/// turns an error into a process exit code.
#[derive(Debug, Error)]
pub enum SncrError {
    /// Error from this app's own wiring (logger, paths).
    #[error("Sncr Error: {message} {location}")]
    Sncr {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Mail(#[from] MailError),
}
