pub mod auth;
pub mod context;
pub mod mail;
pub mod request;
pub mod snow_client;
pub mod template;
pub mod workflow;

pub use auth::AuthError;
pub use context::ContextError;
pub use mail::MailError;
pub use request::{FailureDetail, RequestError};
pub use snow_client::SnowClientError;
pub use template::TemplateError;
pub use workflow::WorkflowError;
