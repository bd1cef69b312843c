//! # Demo Catalogue
//!
//! The built-in `hello` API served by the `velgen` binary.

use serde::{Deserialize, Serialize};
use velgen_core::{ApiType, ErrorSpec, OperationDescriptor, Spec};

/// Input of `hello`.
#[derive(ApiType, Debug, Clone, Serialize, Deserialize)]
pub struct HelloRequest {
    /// Who to greet.
    pub name: String,
}

/// Output of `hello`.
#[derive(ApiType, Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    /// The greeting.
    pub message: String,
}

/// The operations of the demo API.
pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::post::<HelloRequest, HelloResponse>("hello").with_spec(
            Spec::new("Greets the caller by name")
                .with_error(ErrorSpec::new("NAME_REQUIRED", "name must not be empty")),
        ),
    ]
}
