//! # Error Handling
//!
//! Provides the unified `AppError` enum returned by every generation call.
//! Any error is terminal for the call that produced it; no partial artifact
//! is considered valid.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A struct with fields but no name was reached.
    /// Such types cannot be referenced by name in generated output.
    #[from(ignore)]
    #[display("inlined structs are forbidden to use, declare an explicit type (in {context})")]
    InlineTypeForbidden {
        /// Where the anonymous struct was found (operation or `Type.field`).
        context: String,
    },

    /// A shape the graph builder does not traverse
    /// (e.g. `Vec<Option<T>>` around a struct, or a struct used as map key).
    #[from(ignore)]
    #[display("unsupported shape `{shape}` for field `{owner}.{field}`: {reason}")]
    UnsupportedShape {
        /// The type that declares the field.
        owner: String,
        /// The offending field.
        field: String,
        /// Display form of the field type.
        shape: String,
        /// Why it is rejected.
        reason: String,
    },

    /// The type graph refers back to a type that is still being expanded.
    #[from(ignore)]
    #[display("cyclic type reference: {}", chain.join(" -> "))]
    CyclicType {
        /// The names on the expansion stack, ending with the repeated one.
        chain: Vec<String>,
    },

    /// An operation input or output is not a struct.
    #[from(ignore)]
    #[display("operation `{operation}`: {role} must be a struct, got `{shape}`")]
    NotAStruct {
        /// Operation id.
        operation: String,
        /// `input` or `output`.
        role: &'static str,
        /// Display form of the declared type.
        shape: String,
    },

    /// The requested output language is not known.
    #[from(ignore)]
    #[display("language {_0} is not supported")]
    UnsupportedLanguage(String),

    /// No template is registered under the requested key.
    #[from(ignore)]
    #[display("template {_0} not found")]
    TemplateNotFound(String),

    /// The external formatting command failed or could not be started.
    #[from(ignore)]
    #[display("failed to format output with `{command}`: {reason}")]
    PostProcess {
        /// The shell pipeline that was run.
        command: String,
        /// Exit status and captured stderr, or the spawn error.
        reason: String,
    },

    /// Template rendering failure.
    #[display("Template Error: {_0}")]
    Template(minijinja::Error),

    /// YAML serialization failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Template(e) => Some(e),
            AppError::Yaml(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
