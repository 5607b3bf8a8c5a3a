pub mod auth;
pub mod context;
pub mod error;
pub mod report;
pub mod retry;
pub mod snow_client;
pub mod template;
pub mod workflow;

#[cfg(test)]
mod tests;

/// Pipeline variable the create workflow publishes the CR number under.
pub const CR_NUMBER_VARIABLE: &str = "ServiceNow.Cr.Number";
