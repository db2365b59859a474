// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OCI resource models and service operations.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! This crate registers the models of several OCI services in a
//! process-wide [Registry], and defines the request assembly for some of
//! their operations. Responses are decoded with [decode] and [decode_list].
//!
//! # Example
//! ```
//! # use oci_resources::{core, decode};
//! # use model::Value;
//! let body = br#"{"id": "ocid1.localpeeringgateway.oc1..a", "lifecycleState": "FROBNICATING"}"#;
//! let lpg = decode(core::LOCAL_PEERING_GATEWAY, body)?.expect("an object");
//! assert_eq!(lpg.get("lifecycle_state").and_then(Value::as_str), Some("UNKNOWN_ENUM_VALUE"));
//! # Ok::<(), oci_resources::Error>(())
//! ```

use model::{
    Canonicalizer, EnumDescriptor, FieldDescriptor, FieldType, Materializer, ModelBuilder,
    ModelInstance, Registry, RegistryError, TracingDiagnostics,
};
use std::sync::LazyLock;

pub mod budget;
pub mod core;
pub mod data_catalog;
pub mod data_integration;
pub mod data_safe;
pub mod database;
mod error;
pub use error::*;

static REGISTRY: LazyLock<Result<Registry, RegistryError>> = LazyLock::new(build_registry);

/// Returns the registry with every model defined in this crate.
///
/// The registry is built on first use, and shared by all threads.
pub fn registry() -> Result<&'static Registry, Error> {
    REGISTRY.as_ref().map_err(|e| Error::Registry(e.clone()))
}

fn build_registry() -> Result<Registry, RegistryError> {
    let models: Vec<ModelBuilder> = [
        budget::models(),
        core::models(),
        data_catalog::models(),
        data_integration::models(),
        data_safe::models(),
        database::models(),
    ]
    .into_iter()
    .flatten()
    .collect();
    let count = models.len();
    let registry = models
        .into_iter()
        .fold(Registry::builder(), |builder, m| builder.register(m))
        .build()?;
    tracing::debug!(count, "registered OCI models");
    Ok(registry)
}

/// Defined tags, keyed by namespace and then by tag name.
pub(crate) fn defined_tags() -> FieldDescriptor {
    FieldDescriptor::new(
        "defined_tags",
        "definedTags",
        FieldType::map(FieldType::map(FieldType::ANY)),
    )
}

/// Free-form tags, simple key and value pairs.
pub(crate) fn freeform_tags() -> FieldDescriptor {
    FieldDescriptor::new("freeform_tags", "freeformTags", FieldType::map(FieldType::STRING))
}

/// Decodes a response body holding a single model.
///
/// Returns `Ok(None)` if the body is not a JSON object. Unknown enum values
/// and discriminators are reported using [tracing].
pub fn decode(model_type: &str, body: &[u8]) -> Result<Option<ModelInstance>, Error> {
    let registry = registry()?;
    let instance = Materializer::new(registry)
        .with_diagnostics(&TracingDiagnostics)
        .materialize_slice(model_type, body)?;
    Ok(instance)
}

/// Decodes a response body holding a list of models.
///
/// Elements that are not JSON objects are skipped.
pub fn decode_list(model_type: &str, body: &[u8]) -> Result<Vec<ModelInstance>, Error> {
    let registry = registry()?;
    let items: Vec<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| Error::Decode(e.into()))?;
    let materializer = Materializer::new(registry).with_diagnostics(&TracingDiagnostics);
    let mut list = Vec::with_capacity(items.len());
    for item in &items {
        if let Some(instance) = materializer.materialize(model_type, item)? {
            list.push(instance);
        }
    }
    Ok(list)
}

/// Canonicalizes a request body, verifying its model type.
pub(crate) fn request_body(
    operation: &'static str,
    expected: &'static str,
    details: &ModelInstance,
) -> Result<serde_json::Value, Error> {
    let registry = registry()?;
    let descriptor = details.descriptor();
    let is_expected =
        descriptor.name() == expected || descriptor.parent().is_some_and(|p| p == expected);
    if !is_expected {
        return Err(Error::UnexpectedModel {
            operation,
            expected,
            got: details.model_name(),
        });
    }
    Ok(Canonicalizer::new(registry).canonicalize(details)?)
}

/// Validates an enumerated request parameter.
///
/// Unlike model fields, request parameters are rejected when they are not
/// in the closed set, the service would reject them anyway.
pub(crate) fn check_enum(
    name: &'static str,
    value: Option<&str>,
    enumeration: &EnumDescriptor,
) -> Result<(), Error> {
    match value {
        Some(v) if !enumeration.contains(v) => Err(Error::InvalidParameter {
            name,
            value: v.to_string(),
            allowed: enumeration.values().join(", "),
        }),
        _ => Ok(()),
    }
}
