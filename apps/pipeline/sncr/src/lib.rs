// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command};
use crate::error::SncrError;

/// Dispatch the parsed command line. The caller (main) owns the
/// exit-code decision.
pub async fn run(cli: Cli) -> Result<(), SncrError> {
    match cli.command {
        Command::Create { template } => commands::create::run(&template).await,
        Command::Verify => commands::verify::run().await,
        Command::Monitor => commands::monitor::run().await,
        Command::MailLog { log_file, subject } => commands::mail_log::run(&log_file, &subject),
    }
}
