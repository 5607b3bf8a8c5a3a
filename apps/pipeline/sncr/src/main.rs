use sncr::cli::Cli;
use sncr::logger::initialize as LoggerInitialize;

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(dir_error) = create_dir_all(&cli.log_dir) {
        eprintln!("Failed to create log directory: {dir_error}");
        return ExitCode::FAILURE;
    }

    if let Err(logger_error) = LoggerInitialize(&cli.log_dir) {
        eprintln!("{logger_error}");
        return ExitCode::FAILURE;
    }

    info!("sncr pipeline step starting");

    match sncr::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // The one place an error becomes a process exit.
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
