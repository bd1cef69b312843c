//! # OpenAPI Command
//!
//! Writes the OpenAPI document of the catalogue.

use crate::config::GenConfig;
use crate::error::CliResult;
use std::io::Write;
use std::path::PathBuf;
use velgen_core::{generate_openapi, generate_openapi_to_file, OperationDescriptor, SchemaConfig};

/// Arguments for the `openapi` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OpenapiArgs {
    /// `info.title` of the document.
    #[arg(long, env = "VELGEN_TITLE")]
    pub title: Option<String>,

    /// `info.version` of the document.
    #[arg(long = "version", env = "VELGEN_API_VERSION")]
    pub api_version: Option<String>,

    /// Output file. The document goes to stdout when omitted.
    #[arg(short, long, env = "VELGEN_OPENAPI_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl OpenapiArgs {
    /// Layers the flags over the file configuration.
    pub fn resolve(&self, config: &GenConfig) -> (SchemaConfig, Option<PathBuf>) {
        let mut schema = config.schema.clone();
        if let Some(title) = &self.title {
            schema.title = title.clone();
        }
        if let Some(version) = &self.api_version {
            schema.version = version.clone();
        }
        let output = self
            .output
            .clone()
            .or_else(|| config.output.openapi_file.clone());
        (schema, output)
    }
}

/// Generates the document into the resolved file, or into `stdout`.
pub fn execute<W: Write>(
    args: &OpenapiArgs,
    config: &GenConfig,
    operations: &[OperationDescriptor],
    stdout: &mut W,
) -> CliResult<()> {
    let (schema, output) = args.resolve(config);
    match output {
        Some(path) => {
            generate_openapi_to_file(operations, &path, &schema)?;
            writeln!(stdout, "{}", path.display())?;
        }
        None => generate_openapi(operations, stdout, &schema)?,
    }
    Ok(())
}
