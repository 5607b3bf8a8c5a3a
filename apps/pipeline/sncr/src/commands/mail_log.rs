use crate::error::SncrError;

use snow_core::context::EnvVariableSource;
use snow_core::report::Mailer;

use std::path::Path;

/// Mail a step log file as an attachment to the configured addresses.
pub fn run(log_file: &Path, subject: &str) -> Result<(), SncrError> {
    let source = EnvVariableSource::new();
    let mailer = Mailer::from_vars(&source)?;

    mailer.send_log_report(subject, "Step log attached.", log_file)?;

    Ok(())
}
