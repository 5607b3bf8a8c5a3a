use crate::error::SncrError;

use snow_core::context::EnvVariableSource;
use snow_core::workflow;

use std::path::Path;

use log::{info, warn};

/// Create a CR from pipeline variables and promote it to implement.
///
/// A failed promote is reported as a warning, not a step failure - the
/// CR exists and was published, operators move it by hand.
pub async fn run(template: &Path) -> Result<(), SncrError> {
    let mut source = EnvVariableSource::new();

    let outcome = workflow::create_and_promote(&mut source, template).await?;

    if outcome.implemented {
        info!(
            "CR # {} is successfully moved to implement status",
            outcome.cr_number
        );
    } else {
        warn!(
            "Failed to move CR # {} to implement status",
            outcome.cr_number
        );
    }

    Ok(())
}
