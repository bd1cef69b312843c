#![deny(missing_docs)]

//! # Data Models
//!
//! Intermediate Representation (IR) shared by both projections.
//!
//! Everything in here is plain data: it can be cloned, compared and
//! serialized, and holds no function pointers. The renderers consume only
//! these types, never the [`Shape`](crate::shape::Shape) descriptors they
//! were extracted from.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Scalar types with a direct counterpart in every target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// UTF-8 text (`String`, `&str`, `char`).
    String,
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64` and `isize`.
    I64,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64` and `usize`.
    U64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
}

/// The coarse family a [`Primitive`] belongs to.
///
/// Both projections map a primitive through its category first, which keeps
/// them from disagreeing (a number never turns into a string in one output
/// and a boolean in the other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Text.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Booleans.
    Boolean,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 12] = [
        Primitive::String,
        Primitive::Bool,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::F32,
        Primitive::F64,
    ];

    /// Returns the family of this primitive.
    pub fn category(self) -> Category {
        match self {
            Primitive::String => Category::Text,
            Primitive::Bool => Category::Boolean,
            Primitive::F32 | Primitive::F64 => Category::Float,
            _ => Category::Integer,
        }
    }

    /// The Rust spelling of the primitive.
    pub fn rust_name(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Bool => "bool",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
        }
    }
}

/// Composite-looking types that are treated as atomic values.
///
/// Their internal structure is never decomposed nor exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    /// A point in time, serialized as an RFC 3339 string.
    DateTime,
    /// A calendar date, serialized as `YYYY-MM-DD`.
    Date,
}

/// The allow-list of builtin types.
pub const BUILTINS: &[Builtin] = &[Builtin::DateTime, Builtin::Date];

impl Builtin {
    /// Display name used in type identities.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::DateTime => "DateTime",
            Builtin::Date => "NaiveDate",
        }
    }
}

/// A serializable type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A scalar.
    Primitive {
        /// The scalar.
        primitive: Primitive,
    },
    /// An opaque builtin.
    Builtin {
        /// The builtin.
        builtin: Builtin,
    },
    /// A reference to a named struct.
    Named {
        /// The struct name.
        name: String,
    },
    /// A value that may be absent.
    Optional {
        /// The wrapped type.
        inner: Box<TypeExpr>,
    },
    /// An ordered sequence.
    Seq {
        /// The element type.
        inner: Box<TypeExpr>,
    },
    /// An associative container.
    Map {
        /// The key type.
        key: Box<TypeExpr>,
        /// The value type.
        value: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// Whether the outermost layer is an optional reference.
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeExpr::Optional { .. })
    }

    /// Whether this is a builtin value.
    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeExpr::Builtin { .. })
    }

    /// The element type of one level of indirection, if any.
    pub fn unwrap_once(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Optional { inner } | TypeExpr::Seq { inner } => Some(inner),
            TypeExpr::Map { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive { primitive } => write!(f, "{}", primitive.rust_name()),
            TypeExpr::Builtin { builtin } => write!(f, "{}", builtin.name()),
            TypeExpr::Named { name } => write!(f, "{}", name),
            TypeExpr::Optional { inner } => write!(f, "Option<{}>", inner),
            TypeExpr::Seq { inner } => write!(f, "Vec<{}>", inner),
            TypeExpr::Map { key, value } => write!(f, "HashMap<{}, {}>", key, value),
        }
    }
}

/// Classification of a field for traversal purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
    /// Allow-listed atomic type, never decomposed.
    Builtin,
    /// String, number family or boolean.
    Primitive,
    /// Struct, optional, sequence or map.
    Composite,
}

/// Represents a field extracted from a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The Rust field name.
    pub name: String,
    /// Display form of the declared type (e.g. `Vec<HighElem>`).
    pub type_name: String,
    /// The declared type.
    pub ty: TypeExpr,
    /// Traversal classification.
    pub class: FieldClass,
    /// Serialization key from `#[serde(rename)]` / `rename_all`.
    pub json_key: Option<String>,
    /// Query-binding key from `#[api(query)]`.
    pub query_key: Option<String>,
    /// Set for allow-listed builtins; such fields are never traversed.
    pub is_builtin: bool,
}

impl Field {
    /// The key used on the wire, falling back to the field name.
    pub fn wire_name(&self) -> &str {
        self.json_key.as_deref().unwrap_or(&self.name)
    }

    /// Whether the field may be absent.
    pub fn is_optional(&self) -> bool {
        self.ty.is_optional()
    }
}

/// A named, field-decomposed struct.
///
/// An empty field list always carries an empty name: it stands for
/// "no body" rather than for a type to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// The type name; identity within a type graph.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl DataType {
    /// True when there is nothing to send or receive.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
