use std::path::PathBuf;

use clap::{Parser, Subcommand};

use snow_core::template::DEFAULT_TEMPLATE_PATH;

/// ServiceNow change-request automation for deployment pipelines.
#[derive(Debug, Parser)]
#[command(name = "sncr", version, about)]
pub struct Cli {
    /// Directory the step log file is written to.
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a change request and move it to implement state.
    Create {
        /// Site/environment plan template file.
        #[arg(long, value_name = "FILE", default_value = DEFAULT_TEMPLATE_PATH)]
        template: PathBuf,
    },

    /// Fetch an existing change request and log its details.
    Verify,

    /// Verify connectivity and email a status report on failure.
    Monitor,

    /// Email a step log file as an attachment.
    MailLog {
        /// Log file to attach.
        #[arg(long, value_name = "FILE")]
        log_file: PathBuf,

        /// Mail subject line.
        #[arg(long, default_value = "Deployment step log")]
        subject: String,
    },
}
