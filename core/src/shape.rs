//! # Shape Description
//!
//! Describes Rust types to the generator without runtime reflection.
//!
//! A type takes part in generation by implementing [`ApiType`], usually via
//! `#[derive(ApiType)]`. Structs are described lazily through a function
//! pointer so that a type can mention itself (directly or not) without
//! building an infinite value; the graph builder decides what to do with
//! such references.

use crate::model::{Builtin, Primitive, TypeExpr};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// Implemented by every type usable as an operation input, output or field.
pub trait ApiType {
    /// Describes the type.
    fn shape() -> Shape;
}

/// The static description of a type.
#[derive(Clone)]
pub enum Shape {
    /// A scalar.
    Primitive(Primitive),
    /// An allow-listed atomic type.
    Builtin(Builtin),
    /// A struct, named or not.
    Struct(StructRef),
    /// `Option<T>`.
    Optional(Box<Shape>),
    /// `Vec<T>` and friends.
    Seq(Box<Shape>),
    /// `HashMap<K, V>` and friends.
    Map(Box<Shape>, Box<Shape>),
}

impl Shape {
    /// Returns the shape of `T`.
    pub fn of<T: ApiType + ?Sized>() -> Shape {
        T::shape()
    }

    /// The struct behind this shape, if it is one.
    pub fn as_struct(&self) -> Option<&StructRef> {
        match self {
            Shape::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to the serializable form. Structs become name references.
    pub fn expr(&self) -> TypeExpr {
        match self {
            Shape::Primitive(p) => TypeExpr::Primitive { primitive: *p },
            Shape::Builtin(b) => TypeExpr::Builtin { builtin: *b },
            Shape::Struct(s) => TypeExpr::Named {
                name: s.name().to_string(),
            },
            Shape::Optional(inner) => TypeExpr::Optional {
                inner: Box::new(inner.expr()),
            },
            Shape::Seq(inner) => TypeExpr::Seq {
                inner: Box::new(inner.expr()),
            },
            Shape::Map(key, value) => TypeExpr::Map {
                key: Box::new(key.expr()),
                value: Box::new(value.expr()),
            },
        }
    }

    /// Identifier-safe rendering, used to name generic instantiations
    /// (`Page<User>` becomes `PageUser`).
    pub fn name_fragment(&self) -> String {
        let mut out = String::new();
        for part in self
            .expr()
            .to_string()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
        {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", self.expr())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr())
    }
}

/// A struct description: its name and a deferred field list.
#[derive(Clone)]
pub struct StructRef {
    name: String,
    fields: fn() -> Vec<FieldShape>,
}

impl StructRef {
    /// Creates a struct description. An empty `name` marks an anonymous
    /// struct, which generation rejects as soon as it has fields.
    pub fn new(name: impl Into<String>, fields: fn() -> Vec<FieldShape>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expands the field list.
    pub fn fields(&self) -> Vec<FieldShape> {
        (self.fields)()
    }
}

/// One field of a struct description.
#[derive(Clone, Debug)]
pub struct FieldShape {
    /// The Rust field name.
    pub name: String,
    /// The field type.
    pub shape: Shape,
    /// Serialization key, if renamed.
    pub json_key: Option<String>,
    /// Query-binding key, if any.
    pub query_key: Option<String>,
}

impl FieldShape {
    /// Describes a field named `name` of type `T`.
    pub fn of<T: ApiType + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::shape())
    }

    /// Describes a field from an explicit shape.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            json_key: None,
            query_key: None,
        }
    }

    /// Sets the serialization key.
    pub fn json(mut self, key: impl Into<String>) -> Self {
        self.json_key = Some(key.into());
        self
    }

    /// Sets the query-binding key.
    pub fn query(mut self, key: impl Into<String>) -> Self {
        self.query_key = Some(key.into());
        self
    }
}

macro_rules! primitive_types {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl ApiType for $ty {
                fn shape() -> Shape {
                    Shape::Primitive(Primitive::$prim)
                }
            }
        )*
    };
}

primitive_types! {
    String => String,
    str => String,
    char => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => U64,
    f32 => F32,
    f64 => F64,
}

impl<T: ApiType + ?Sized> ApiType for &T {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: ApiType + ?Sized> ApiType for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: ApiType> ApiType for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }
}

impl<T: ApiType> ApiType for Vec<T> {
    fn shape() -> Shape {
        Shape::Seq(Box::new(T::shape()))
    }
}

impl<T: ApiType> ApiType for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Seq(Box::new(T::shape()))
    }
}

impl<T: ApiType> ApiType for [T] {
    fn shape() -> Shape {
        Shape::Seq(Box::new(T::shape()))
    }
}

impl<K: ApiType, V: ApiType, S> ApiType for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
}

impl<K: ApiType, V: ApiType> ApiType for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
}

impl<K: ApiType, V: ApiType, S> ApiType for indexmap::IndexMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
    }
}

impl<Tz: chrono::TimeZone> ApiType for chrono::DateTime<Tz> {
    fn shape() -> Shape {
        Shape::Builtin(Builtin::DateTime)
    }
}

impl ApiType for chrono::NaiveDateTime {
    fn shape() -> Shape {
        Shape::Builtin(Builtin::DateTime)
    }
}

impl ApiType for chrono::NaiveDate {
    fn shape() -> Shape {
        Shape::Builtin(Builtin::Date)
    }
}

/// The unit type is the empty anonymous struct: "no body".
impl ApiType for () {
    fn shape() -> Shape {
        Shape::Struct(StructRef::new("", Vec::new))
    }
}

impl<A: ApiType, B: ApiType> ApiType for (A, B) {
    fn shape() -> Shape {
        Shape::Struct(StructRef::new("", || {
            vec![FieldShape::of::<A>("0"), FieldShape::of::<B>("1")]
        }))
    }
}

impl<A: ApiType, B: ApiType, C: ApiType> ApiType for (A, B, C) {
    fn shape() -> Shape {
        Shape::Struct(StructRef::new("", || {
            vec![
                FieldShape::of::<A>("0"),
                FieldShape::of::<B>("1"),
                FieldShape::of::<C>("2"),
            ]
        }))
    }
}
