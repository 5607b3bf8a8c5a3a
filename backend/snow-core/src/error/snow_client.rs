use crate::error::context::ContextError;
use crate::error::request::RequestError;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SnowClientError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Request(#[from] RequestError),
}
