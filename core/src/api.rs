//! # Entry Points
//!
//! One call per artifact. Configuration is checked before anything is
//! rendered, and the file variants render fully into memory before the
//! output file is created.

use crate::error::{AppError, AppResult};
use crate::generator::{ClientDesc, Generator};
use crate::lang::Language;
use crate::openapi::SchemaConfig;
use crate::operation::OperationDescriptor;
use crate::render::{Renderer, TemplateKey, DEFAULT_VARIANT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the generated client file.
pub const CLIENT_FILE_STEM: &str = "client";

/// Settings of one client generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Name of the client type.
    pub type_name: String,
    /// Package / module of the generated file.
    pub package_name: String,
    /// Directory receiving `client.<ext>`.
    pub output_dir: PathBuf,
    /// Language token (`go`, `ts`, `rust`, ...).
    pub language: String,
    /// Shell command the rendered source is piped through.
    pub post_process: Option<String>,
    /// Template variant.
    pub variant: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let desc = ClientDesc::default();
        Self {
            type_name: desc.type_name,
            package_name: desc.package_name,
            output_dir: PathBuf::from("."),
            language: Language::Go.to_string(),
            post_process: None,
            variant: DEFAULT_VARIANT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Parses the language and checks that its template variant exists.
    ///
    /// # Errors
    ///
    /// [`AppError::UnsupportedLanguage`] or [`AppError::TemplateNotFound`].
    pub fn template_key(&self, renderer: &Renderer) -> AppResult<TemplateKey> {
        let key = TemplateKey::new(self.language.parse()?, self.variant.as_str());
        if !renderer.has_template(&key) {
            return Err(AppError::TemplateNotFound(key.to_string()));
        }
        Ok(key)
    }

    /// Path of the generated file.
    pub fn output_path(&self, language: Language) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", CLIENT_FILE_STEM, language.extension()))
    }

    fn desc(&self) -> ClientDesc {
        ClientDesc {
            type_name: self.type_name.clone(),
            package_name: self.package_name.clone(),
        }
    }

    fn post_process(&self) -> Option<&str> {
        self.post_process.as_deref().filter(|c| !c.trim().is_empty())
    }
}

fn client_source(
    operations: &[OperationDescriptor],
    config: &ClientConfig,
) -> AppResult<(TemplateKey, Vec<u8>)> {
    let renderer = Renderer::new()?;
    let key = config.template_key(&renderer)?;
    let generator = Generator::new(config.desc(), operations)?;
    let source = generator.client_source(&renderer, &key, config.post_process())?;
    Ok((key, source))
}

/// Generates the client source into `writer`.
///
/// # Errors
///
/// Configuration errors are reported before the graph is built; any later
/// failure leaves `writer` untouched.
pub fn generate_client<W: Write>(
    operations: &[OperationDescriptor],
    writer: &mut W,
    config: &ClientConfig,
) -> AppResult<()> {
    let (_, source) = client_source(operations, config)?;
    writer.write_all(&source)?;
    Ok(())
}

/// Generates `<output_dir>/client.<ext>`, creating the directory if needed.
///
/// Returns the written path.
pub fn generate_client_to_file(
    operations: &[OperationDescriptor],
    config: &ClientConfig,
) -> AppResult<PathBuf> {
    let (key, source) = client_source(operations, config)?;
    let path = config.output_path(key.language);
    write_file(&path, &source)?;
    info!(path = %path.display(), "client written");
    Ok(path)
}

/// Generates the OpenAPI YAML document into `writer`.
pub fn generate_openapi<W: Write>(
    operations: &[OperationDescriptor],
    writer: &mut W,
    config: &SchemaConfig,
) -> AppResult<()> {
    let generator = Generator::new(ClientDesc::default(), operations)?;
    generator.generate_openapi(writer, config)
}

/// Generates the OpenAPI YAML document at `path`, creating parent
/// directories if needed.
pub fn generate_openapi_to_file(
    operations: &[OperationDescriptor],
    path: impl AsRef<Path>,
    config: &SchemaConfig,
) -> AppResult<()> {
    let mut buffer = Vec::new();
    generate_openapi(operations, &mut buffer, config)?;
    let path = path.as_ref();
    write_file(path, &buffer)?;
    info!(path = %path.display(), "openapi document written");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
