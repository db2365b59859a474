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

//! Errors reported by the marshaling engine.
//!
//! Only structural defects are reported as errors. Values the service sends
//! that the client does not recognize (new enum values, new subtypes, shapes
//! that do not match the declared types) are recovered locally and reported
//! through [Diagnostics][crate::Diagnostics] instead.

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for materialization, canonicalization and field access.
///
/// # Example
/// ```
/// # use oci_model::{Error, Registry};
/// let registry = Registry::builder().build()?;
/// let err = registry.describe("NotAModel").unwrap_err();
/// assert!(matches!(err, Error::UnknownModel(ref name) if name == "NotAModel"));
/// # Ok::<(), oci_model::RegistryError>(())
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The model type was never registered.
    ///
    /// This indicates a defect in the client library, not a problem with
    /// the service response.
    #[error("unknown model type {0}")]
    UnknownModel(String),

    /// The same field was supplied under its wire name and its local name
    /// when constructing a model directly.
    #[error("you cannot provide both :{wire} and :{local}")]
    ConflictingFieldAlias {
        /// The wire (camelCase) key supplied by the caller.
        wire: String,
        /// The local (snake_case) key supplied by the caller.
        local: String,
    },

    /// The model does not declare a field with this local name.
    #[error("model {model} has no field named {field}")]
    UnknownField {
        /// The model type.
        model: String,
        /// The rejected field name.
        field: String,
    },

    /// A value assigned to a field has no representation in the field's
    /// declared type.
    #[error("cannot assign to {model}.{field}, expected {expected}")]
    InvalidValue {
        /// The model type.
        model: String,
        /// The field local name.
        field: String,
        /// A short description of the declared type.
        expected: &'static str,
    },

    /// The attributes supplied to construct a subtype carry a discriminator
    /// value other than the subtype's own tag.
    #[error("{model} requires {field}={expected}, got {got}")]
    ConflictingDiscriminator {
        /// The concrete model type.
        model: String,
        /// The discriminator wire key.
        field: String,
        /// The subtype's tag.
        expected: &'static str,
        /// The supplied value, as JSON.
        got: String,
    },

    /// The payload could not be decoded as JSON.
    #[error("cannot deserialize payload, source={0}")]
    Deserialize(#[source] BoxedError),
}

impl Error {
    pub(crate) fn unknown_model<T: Into<String>>(name: T) -> Self {
        Self::UnknownModel(name.into())
    }

    pub(crate) fn unknown_field(model: &str, field: &str) -> Self {
        Self::UnknownField {
            model: model.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn deser<T: Into<BoxedError>>(source: T) -> Self {
        Self::Deserialize(source.into())
    }
}

/// Problems detected while building a [Registry][crate::Registry].
///
/// These are always defects in the model definitions. The registry refuses
/// to build rather than fail later, at resolve or materialize time.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two models were registered with the same name.
    #[error("model {0} is registered more than once")]
    DuplicateModel(String),

    /// Two fields in the same model share a local name.
    #[error("model {model} declares field {field} more than once")]
    DuplicateField { model: String, field: String },

    /// Two fields in the same model share a wire name.
    #[error("model {model} maps wire key {wire_name} more than once")]
    DuplicateWireName { model: String, wire_name: String },

    /// A field references a model that is not registered.
    #[error("field {model}.{field} references unregistered model {target}")]
    UnresolvedReference {
        model: String,
        field: String,
        target: String,
    },

    /// A discriminator maps a value to a model that is not registered.
    #[error("discriminator {model}.{discriminator} maps {value} to unregistered model {target}")]
    UnresolvedSubtype {
        model: String,
        discriminator: String,
        value: String,
        target: String,
    },

    /// A discriminator maps the same value twice.
    #[error("discriminator {model}.{discriminator} maps {value} more than once")]
    DuplicateDiscriminatorValue {
        model: String,
        discriminator: String,
        value: String,
    },

    /// The discriminator wire key is not a field of the base model.
    #[error("discriminator {discriminator} is not a field of model {model}")]
    UnknownDiscriminatorField { model: String, discriminator: String },

    /// A subtype declares a tag, but its parent has no discriminator.
    #[error("model {model} declares a tag, but its parent {parent:?} has no discriminator")]
    MissingDiscriminator { model: String, parent: String },

    /// A subtype names a parent that is not registered.
    #[error("model {model} extends unregistered model {parent}")]
    UnknownParent { model: String, parent: String },
}
