use crate::error::SncrError;

use snow_core::context::EnvVariableSource;
use snow_core::workflow;

use log::{info, warn};

/// Fetch an existing CR and log its details.
pub async fn run() -> Result<(), SncrError> {
    let source = EnvVariableSource::new();

    match workflow::verify(&source).await? {
        Some(result) => info!("CR details: {result}"),
        None => warn!("ServiceNow response contained no CR details"),
    }

    Ok(())
}
