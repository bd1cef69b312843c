//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use velgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// A generation call failed.
    #[display("{}", _0)]
    Core(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The YAML configuration file could not be parsed.
    #[display("Invalid YAML config: {}", _0)]
    Yaml(serde_yaml::Error),

    /// The JSON configuration file could not be parsed.
    #[display("Invalid JSON config: {}", _0)]
    Json(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
