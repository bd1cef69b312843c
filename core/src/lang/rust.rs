//! Rust spelling of types and identifiers.

use super::TypeMapper;
use crate::model::{Builtin, Primitive};
use heck::ToSnakeCase;

/// Keywords that need the raw identifier prefix.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers; they get a trailing underscore.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Maps types to Rust.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustMapper;

impl TypeMapper for RustMapper {
    fn primitive(&self, primitive: Primitive) -> String {
        primitive.rust_name().to_string()
    }

    fn builtin(&self, _builtin: Builtin) -> String {
        "String".to_string()
    }

    fn optional(&self, inner: String) -> String {
        format!("Option<{}>", inner)
    }

    fn seq(&self, inner: String) -> String {
        format!("Vec<{}>", inner)
    }

    fn map(&self, key: String, value: String) -> String {
        format!("std::collections::HashMap<{}, {}>", key, value)
    }

    fn field_ident(&self, name: &str, _wire_name: &str) -> String {
        escape(name.to_snake_case())
    }

    fn method_ident(&self, operation_id: &str) -> String {
        escape(operation_id.to_snake_case())
    }
}

fn escape(ident: String) -> String {
    if PATH_KEYWORDS.contains(&ident.as_str()) {
        format!("{}_", ident)
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}
