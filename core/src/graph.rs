//! # Reference Graph Builder
//!
//! Walks every operation's input and output, discovers each struct reachable
//! through field traversal and registers it exactly once in a shared
//! [`TypeGraph`].
//!
//! Traversal descends through one level of `Option` / sequence / map
//! indirection. A revisited name is skipped when its expansion is complete
//! and rejected as a cycle while it is still being expanded.

use crate::docs::Spec;
use crate::error::{AppError, AppResult};
use crate::extract::{extract_data_type, extract_struct};
use crate::model::{Category, DataType, Primitive};
use crate::operation::{capitalize, Method, OperationDescriptor};
use crate::shape::{FieldShape, Shape, StructRef};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// The deduplicated set of all data types referenced by all operations.
///
/// Iteration follows first-seen insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeGraph {
    types: IndexMap<String, DataType>,
}

impl TypeGraph {
    /// Inserts a type. Returns `false` (and keeps the existing entry) when
    /// the name is already present.
    pub fn insert(&mut self, data_type: DataType) -> bool {
        if self.types.contains_key(&data_type.name) {
            return false;
        }
        self.types.insert(data_type.name.clone(), data_type);
        true
    }

    /// Whether a type with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks a type up by name.
    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    /// Types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DataType> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// An operation with its input/output extracted and its type closure resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSchema {
    /// Input type (empty when the operation takes no body).
    pub input: DataType,
    /// Output type (empty when the operation returns no body).
    pub output: DataType,
    /// Operation id.
    pub operation_id: String,
    /// HTTP method.
    pub method: Method,
    /// Operation id with its first letter upper-cased.
    pub func_name: String,
    /// Types first registered while walking this operation, in insertion
    /// order. Types owned by an earlier operation are not repeated here.
    pub data_types: Vec<DataType>,
    /// Documentation metadata.
    pub spec: Spec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Builds the type graph and the per-operation schemas.
///
/// # Errors
///
/// Fails on the first anonymous struct, unsupported shape, cyclic reference
/// or non-struct input/output.
pub fn build(operations: &[OperationDescriptor]) -> AppResult<(TypeGraph, Vec<OperationSchema>)> {
    let mut builder = GraphBuilder::default();
    let mut seen_ids = HashSet::new();
    let mut schemas = Vec::with_capacity(operations.len());

    for op in operations {
        if !seen_ids.insert(op.operation_id.as_str()) {
            warn!(operation = %op.operation_id, "duplicate operation id");
        }
        schemas.push(builder.operation(op)?);
    }

    debug!(
        types = builder.graph.len(),
        operations = schemas.len(),
        "type graph built"
    );
    Ok((builder.graph, schemas))
}

#[derive(Default)]
struct GraphBuilder {
    graph: TypeGraph,
    state: HashMap<String, Visit>,
    stack: Vec<String>,
}

impl GraphBuilder {
    fn operation(&mut self, op: &OperationDescriptor) -> AppResult<OperationSchema> {
        let input = root_type(op, &op.input, "input")?;
        let output = root_type(op, &op.output, "output")?;

        let mut local = Vec::new();
        for (shape, role) in [(&op.input, "input"), (&op.output, "output")] {
            if let Some(sref) = shape.as_struct() {
                let context = format!("{} {}", op.operation_id, role);
                self.visit(sref, &context, &mut local)?;
            }
        }

        Ok(OperationSchema {
            input,
            output,
            operation_id: op.operation_id.clone(),
            method: op.method,
            func_name: capitalize(&op.operation_id),
            data_types: local,
            spec: op.spec.clone(),
        })
    }

    fn visit(
        &mut self,
        sref: &StructRef,
        context: &str,
        local: &mut Vec<DataType>,
    ) -> AppResult<()> {
        let data_type = extract_struct(sref, context)?;
        if data_type.is_empty() {
            return Ok(());
        }

        let name = data_type.name.clone();
        match self.state.get(&name) {
            Some(Visit::Done) => {
                if self.graph.get(&name) != Some(&data_type) {
                    warn!(type_name = %name, "distinct types share a name; keeping the first");
                }
                return Ok(());
            }
            Some(Visit::InProgress) => {
                let mut chain = self.stack.clone();
                chain.push(name);
                return Err(AppError::CyclicType { chain });
            }
            None => {}
        }

        self.state.insert(name.clone(), Visit::InProgress);
        self.stack.push(name.clone());
        self.graph.insert(data_type.clone());
        local.push(data_type);
        debug!(type_name = %name, "registered type");

        for field in sref.fields() {
            self.visit_field(&name, &field, local)?;
        }

        self.stack.pop();
        self.state.insert(name, Visit::Done);
        Ok(())
    }

    fn visit_field(
        &mut self,
        owner: &str,
        field: &FieldShape,
        local: &mut Vec<DataType>,
    ) -> AppResult<()> {
        match &field.shape {
            Shape::Primitive(_) | Shape::Builtin(_) => Ok(()),
            Shape::Struct(sref) => self.visit_member(owner, field, sref, local),
            Shape::Optional(inner) | Shape::Seq(inner) => {
                self.visit_element(owner, field, inner, local)
            }
            Shape::Map(key, value) => {
                if let Some(reason) = check_map_key(key) {
                    return Err(unsupported(owner, field, reason));
                }
                self.visit_element(owner, field, value, local)
            }
        }
    }

    /// Visits a struct used as a field type. A struct without fields has no
    /// component to reference and no type in the client.
    fn visit_member(
        &mut self,
        owner: &str,
        field: &FieldShape,
        sref: &StructRef,
        local: &mut Vec<DataType>,
    ) -> AppResult<()> {
        if sref.fields().is_empty() {
            return Err(unsupported(
                owner,
                field,
                "structs without fields cannot be used as field types",
            ));
        }
        let context = format!("{}.{}", owner, field.name);
        self.visit(sref, &context, local)
    }

    /// Handles the element reached after exactly one level of indirection.
    fn visit_element(
        &mut self,
        owner: &str,
        field: &FieldShape,
        element: &Shape,
        local: &mut Vec<DataType>,
    ) -> AppResult<()> {
        match element {
            Shape::Primitive(_) | Shape::Builtin(_) => Ok(()),
            Shape::Struct(sref) => self.visit_member(owner, field, sref, local),
            nested => {
                if contains_struct(nested) {
                    return Err(unsupported(
                        owner,
                        field,
                        "doubly-indirect shapes around a struct are not supported",
                    ));
                }
                match nested_key_problem(nested) {
                    Some(reason) => Err(unsupported(owner, field, reason)),
                    None => Ok(()),
                }
            }
        }
    }
}

fn root_type(op: &OperationDescriptor, shape: &Shape, role: &'static str) -> AppResult<DataType> {
    if shape.as_struct().is_none() {
        return Err(AppError::NotAStruct {
            operation: op.operation_id.clone(),
            role,
            shape: shape.to_string(),
        });
    }
    extract_data_type(shape, &format!("{} {}", op.operation_id, role))
}

fn unsupported(owner: &str, field: &FieldShape, reason: &str) -> AppError {
    AppError::UnsupportedShape {
        owner: owner.to_string(),
        field: field.name.clone(),
        shape: field.shape.to_string(),
        reason: reason.to_string(),
    }
}

fn contains_struct(shape: &Shape) -> bool {
    match shape {
        Shape::Struct(_) => true,
        Shape::Primitive(_) | Shape::Builtin(_) => false,
        Shape::Optional(inner) | Shape::Seq(inner) => contains_struct(inner),
        Shape::Map(key, value) => contains_struct(key) || contains_struct(value),
    }
}

fn check_map_key(key: &Shape) -> Option<&'static str> {
    match key {
        Shape::Primitive(p) if *p == Primitive::String => None,
        Shape::Primitive(p) if p.category() == Category::Integer => None,
        _ => Some("map keys must be strings or integers"),
    }
}

fn nested_key_problem(shape: &Shape) -> Option<&'static str> {
    match shape {
        Shape::Map(key, value) => check_map_key(key).or_else(|| nested_key_problem(value)),
        Shape::Optional(inner) | Shape::Seq(inner) => nested_key_problem(inner),
        _ => None,
    }
}
