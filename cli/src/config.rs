//! # Configuration File
//!
//! `--config <file>` loads a [`GenConfig`] (YAML, or JSON when the file ends
//! in `.json`). Explicit command line flags win over file values.

use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use velgen_core::{ClientConfig, SchemaConfig};

/// Everything a `velgen` invocation can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Client generation settings. `output_dir` is replaced by the
    /// resolved `output.client_dir`.
    pub client: ClientConfig,
    /// Document settings.
    pub schema: SchemaConfig,
    /// Where artifacts go; stdout for anything left unset.
    pub output: OutputConfig,
}

/// Artifact destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `client.<ext>`.
    pub client_dir: Option<PathBuf>,
    /// Path of the OpenAPI document.
    pub openapi_file: Option<PathBuf>,
}

impl GenConfig {
    /// Reads the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
