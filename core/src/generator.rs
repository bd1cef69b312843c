//! # Generator
//!
//! The aggregate both projections read from: client naming, the type graph
//! and the per-operation schemas, built once per [`Generator::new`] call.

use crate::error::AppResult;
use crate::graph::{self, OperationSchema, TypeGraph};
use crate::openapi::{self, document::Document, SchemaConfig};
use crate::operation::OperationDescriptor;
use crate::postprocess;
use crate::render::{ClientContext, Renderer, TemplateKey};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

/// Naming of the generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDesc {
    /// Name of the client type.
    pub type_name: String,
    /// Package / module of the generated file.
    pub package_name: String,
}

impl Default for ClientDesc {
    fn default() -> Self {
        Self {
            type_name: "Client".to_string(),
            package_name: "client".to_string(),
        }
    }
}

/// The graph and operations of one generation run.
#[derive(Debug, Clone)]
pub struct Generator {
    desc: ClientDesc,
    graph: TypeGraph,
    operations: Vec<OperationSchema>,
}

impl Generator {
    /// Extracts every operation and builds the type graph.
    ///
    /// # Errors
    ///
    /// Any shape error raised while building the graph.
    pub fn new(desc: ClientDesc, operations: &[OperationDescriptor]) -> AppResult<Self> {
        let (graph, operations) = graph::build(operations)?;
        Ok(Self {
            desc,
            graph,
            operations,
        })
    }

    /// Client naming.
    pub fn desc(&self) -> &ClientDesc {
        &self.desc
    }

    /// The deduplicated type graph.
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// Operations in registration order.
    pub fn operations(&self) -> &[OperationSchema] {
        &self.operations
    }

    /// Template context for `key`'s language.
    pub fn client_context(&self, key: &TemplateKey) -> ClientContext {
        ClientContext::new(
            &self.operations,
            key.language,
            &self.desc.type_name,
            &self.desc.package_name,
        )
    }

    /// Renders the client and runs the optional post-process command.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` for an unknown key, then any rendering or
    /// post-process failure.
    pub fn client_source(
        &self,
        renderer: &Renderer,
        key: &TemplateKey,
        post_process: Option<&str>,
    ) -> AppResult<Vec<u8>> {
        let rendered = renderer.render(key, &self.client_context(key))?;
        let source = match post_process {
            Some(command) => postprocess::run(command, rendered.as_bytes())?,
            None => rendered.into_bytes(),
        };
        info!(template = %key, bytes = source.len(), "client generated");
        Ok(source)
    }

    /// Renders the client into `writer`.
    pub fn generate_client<W: Write>(
        &self,
        writer: &mut W,
        key: &TemplateKey,
        post_process: Option<&str>,
    ) -> AppResult<()> {
        let renderer = Renderer::new()?;
        let source = self.client_source(&renderer, key, post_process)?;
        writer.write_all(&source)?;
        Ok(())
    }

    /// Builds the OpenAPI document.
    pub fn openapi(&self, config: &SchemaConfig) -> Document {
        openapi::assemble(self, config)
    }

    /// Writes the OpenAPI document as YAML into `writer`.
    pub fn generate_openapi<W: Write>(
        &self,
        writer: &mut W,
        config: &SchemaConfig,
    ) -> AppResult<()> {
        let yaml = openapi::to_yaml(&self.openapi(config))?;
        writer.write_all(yaml.as_bytes())?;
        info!(bytes = yaml.len(), "openapi document generated");
        Ok(())
    }
}
