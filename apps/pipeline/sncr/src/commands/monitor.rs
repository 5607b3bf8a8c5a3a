use crate::error::SncrError;

use snow_core::context::EnvVariableSource;
use snow_core::report::Mailer;
use snow_core::workflow;

use log::info;

/// Verify connectivity to ServiceNow; on any failure a status report
/// is mailed before the error surfaces.
pub async fn run() -> Result<(), SncrError> {
    let source = EnvVariableSource::new();
    let mailer = Mailer::from_vars(&source)?;

    let outcome = workflow::monitor(&source, &mailer).await?;

    match outcome.result {
        Some(result) => info!("CR details: {result}"),
        None => info!("ServiceNow response contained no CR details"),
    }

    Ok(())
}
