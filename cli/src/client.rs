//! # Client Command
//!
//! Renders the client of the catalogue for one language.

use crate::config::GenConfig;
use crate::error::CliResult;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use velgen_core::{generate_client, generate_client_to_file, ClientConfig, OperationDescriptor};

/// Arguments for the `client` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Target language (`go`, `ts`, `rust`).
    #[arg(short, long, env = "VELGEN_LANG")]
    pub lang: Option<String>,

    /// Directory receiving `client.<ext>`. Source goes to stdout when omitted.
    #[arg(short, long, env = "VELGEN_OUT")]
    pub out: Option<PathBuf>,

    /// Name of the generated client type.
    #[arg(long, env = "VELGEN_TYPE_NAME")]
    pub type_name: Option<String>,

    /// Package or module name of the generated file.
    #[arg(long, env = "VELGEN_PACKAGE")]
    pub package: Option<String>,

    /// Shell command the rendered source is piped through (e.g. `gofmt`).
    #[arg(long, env = "VELGEN_POST_PROCESS")]
    pub post_process: Option<String>,

    /// Template variant.
    #[arg(long, env = "VELGEN_VARIANT")]
    pub variant: Option<String>,
}

impl ClientArgs {
    /// Layers the flags over the file configuration.
    pub fn resolve(&self, config: &GenConfig) -> (ClientConfig, Option<PathBuf>) {
        let mut client = config.client.clone();
        if let Some(lang) = &self.lang {
            client.language = lang.clone();
        }
        if let Some(type_name) = &self.type_name {
            client.type_name = type_name.clone();
        }
        if let Some(package) = &self.package {
            client.package_name = package.clone();
        }
        if let Some(command) = &self.post_process {
            client.post_process = Some(command.clone());
        }
        if let Some(variant) = &self.variant {
            client.variant = variant.clone();
        }
        let out = self.out.clone().or_else(|| config.output.client_dir.clone());
        if let Some(dir) = &out {
            client.output_dir = dir.clone();
        }
        (client, out)
    }
}

/// Generates the client into the resolved directory, or into `stdout`.
pub fn execute<W: Write>(
    args: &ClientArgs,
    config: &GenConfig,
    operations: &[OperationDescriptor],
    stdout: &mut W,
) -> CliResult<()> {
    let (client, out) = args.resolve(config);
    info!(language = %client.language, operations = operations.len(), "generating client");

    match out {
        Some(_) => {
            let path = generate_client_to_file(operations, &client)?;
            writeln!(stdout, "{}", path.display())?;
        }
        None => generate_client(operations, stdout, &client)?,
    }
    Ok(())
}
