#![deny(missing_docs)]

//! # Velgen CLI
//!
//! Command line front-end over `velgen-core`.
//!
//! Supported Commands:
//! - `client`: Renders the API client for one language.
//! - `openapi`: Writes the OpenAPI 3.0.0 document.
//! - `list`: Prints the operations of the catalogue, or the client
//!   templates with `--templates`.
//!
//! The `velgen` binary runs over the built-in [`demo`] catalogue. Projects
//! with their own operations wrap [`run`] in a binary of their own.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use velgen_core::render::Renderer;
use velgen_core::OperationDescriptor;

pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod openapi;

pub use config::GenConfig;
pub use error::{CliError, CliResult};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(author, version, about = "API client and OpenAPI generator")]
pub struct Cli {
    /// Raise log verbosity (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML or JSON configuration file.
    #[arg(short, long, env = "VELGEN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the API client source.
    Client(client::ClientArgs),
    /// Generate the OpenAPI YAML document.
    Openapi(openapi::OpenapiArgs),
    /// List the operations of the catalogue.
    List(ListArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// List the available client templates (`<language>:<variant>`) instead.
    #[arg(long)]
    pub templates: bool,
}

/// Runs `cli` over `operations`, printing to stdout.
pub fn run(cli: &Cli, operations: &[OperationDescriptor]) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    run_with(cli, operations, &mut lock)
}

/// Runs `cli` over `operations`, printing to `stdout`.
pub fn run_with<W: Write>(
    cli: &Cli,
    operations: &[OperationDescriptor],
    stdout: &mut W,
) -> CliResult<()> {
    let config = GenConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Client(args) => client::execute(args, &config, operations, stdout)?,
        Commands::Openapi(args) => openapi::execute(args, &config, operations, stdout)?,
        Commands::List(args) => list(args, operations, stdout)?,
    }
    Ok(())
}

fn list<W: Write>(
    args: &ListArgs,
    operations: &[OperationDescriptor],
    stdout: &mut W,
) -> CliResult<()> {
    if args.templates {
        for key in Renderer::keys() {
            writeln!(stdout, "{}", key)?;
        }
        return Ok(());
    }
    for op in operations {
        writeln!(
            stdout,
            "{:<6} /{}  {} -> {}",
            op.method.to_string(),
            op.operation_id,
            op.input,
            op.output
        )?;
    }
    Ok(())
}

/// Log filter for a verbosity level, unless `RUST_LOG` is set.
pub fn log_filter(verbose: u8) -> String {
    match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    }
}
