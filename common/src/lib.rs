//! Shared types for the ServiceNow change-request tooling.
//!
//! This crate contains pure data structures used across layers. No
//! business logic lives here.
//!
//! ## Architecture
//!
//! - **common** (this crate): Shared value types
//! - **snow-core**: ServiceNow client and workflow logic
//! - **sncr**: Pipeline-step binary wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
