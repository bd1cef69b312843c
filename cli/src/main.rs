//! # velgen
//!
//! Generates the client and OpenAPI document of the built-in demo API.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use velgen_cli::{demo, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli, &demo::operations()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_new(velgen_cli::log_filter(verbose))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
