use curator::args::Args;
use curator::error::CuratorError;
use curator::logger::initialize as LoggerInitialize;
use curator::run::run;

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_dir = args.log_dir();
    if let Err(e) = create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {}: {e}", log_dir.display());
        return ExitCode::FAILURE;
    }

    // Initialize logger FIRST
    if let Err(e) = LoggerInitialize(&log_dir, args.log_level()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    info!("Curator starting");
    info!("Log directory: {}", log_dir.display());

    match run(&args).await {
        Ok(keywords) => {
            info!("Curator finished with {} keywords", keywords.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Structured failure report on stderr for callers scripting the curator.
fn report(error: &CuratorError) {
    match serde_json::to_string(error) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{error}"),
    }
}
