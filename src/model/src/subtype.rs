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

//! Polymorphic dispatch: picking the concrete model for a raw object.

use crate::descriptor::ModelDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, RegistryError};
use crate::registry::Registry;
use std::sync::Arc;

/// Maps the values of a discriminator field to concrete model types.
///
/// # Example
/// ```
/// # use oci_model::Discriminator;
/// let d = Discriminator::new("attachmentType")
///     .map("iscsi", "IScsiVolumeAttachment")
///     .map("paravirtualized", "ParavirtualizedVolumeAttachment");
/// assert_eq!(d.target("iscsi"), Some("IScsiVolumeAttachment"));
/// assert_eq!(d.target("nvme"), None);
/// assert_eq!(d.default_model("VolumeAttachment"), "VolumeAttachment");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discriminator {
    wire_name: &'static str,
    mapping: Vec<(&'static str, &'static str)>,
    default: Option<&'static str>,
}

impl Discriminator {
    /// Creates a discriminator reading the `wire_name` key.
    pub fn new(wire_name: &'static str) -> Self {
        Self {
            wire_name,
            mapping: Vec::new(),
            default: None,
        }
    }

    /// Maps `value` to the `model` type.
    pub fn map(mut self, value: &'static str, model: &'static str) -> Self {
        self.mapping.push((value, model));
        self
    }

    /// Changes the model used for missing or unmapped values. The base type
    /// is used if this is not set.
    pub fn with_default(mut self, model: &'static str) -> Self {
        self.default = Some(model);
        self
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    /// The discriminator values and their model types, in mapping order.
    pub fn mapping(&self) -> &[(&'static str, &'static str)] {
        &self.mapping
    }

    /// Finds the model type for `value`.
    pub fn target(&self, value: &str) -> Option<&'static str> {
        self.mapping
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, model)| *model)
    }

    /// The model used for missing or unmapped values.
    pub fn default_model(&self, base: &'static str) -> &'static str {
        self.default.unwrap_or(base)
    }

    pub(crate) fn check_unique(&self, model: &str) -> Result<(), RegistryError> {
        for (i, (value, _)) in self.mapping.iter().enumerate() {
            if self.mapping[..i].iter().any(|(v, _)| v == value) {
                return Err(RegistryError::DuplicateDiscriminatorValue {
                    model: model.to_string(),
                    discriminator: self.wire_name.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Resolves the concrete [ModelDescriptor] for a raw object.
pub struct SubtypeResolver<'a> {
    registry: &'a Registry,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> SubtypeResolver<'a> {
    pub fn new(registry: &'a Registry, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    /// Picks the concrete model for `raw`, given its declared base type.
    ///
    /// * Models without a discriminator resolve to themselves.
    /// * A missing, non-string, or unmapped discriminator value resolves to
    ///   the discriminator's default model (the base type unless configured
    ///   otherwise), and a [Diagnostic::UnknownSubtype] is emitted.
    /// * Otherwise the mapped model is returned.
    ///
    /// Fails only if `base_model_type` is not registered.
    pub fn resolve(
        &self,
        base_model_type: &str,
        raw: &serde_json::Value,
    ) -> Result<Arc<ModelDescriptor>, Error> {
        let base = self.registry.describe(base_model_type)?;
        let Some(discriminator) = base.discriminator() else {
            return Ok(base);
        };
        let value = raw.get(discriminator.wire_name()).and_then(|v| v.as_str());
        if let Some(target) = value.and_then(|v| discriminator.target(v)) {
            tracing::debug!(
                base = base.name(),
                value,
                target,
                "resolved polymorphic subtype"
            );
            return self.registry.describe(target);
        }
        let fallback = discriminator.default_model(base.name());
        self.diagnostics.emit(&Diagnostic::UnknownSubtype {
            base: base.name(),
            discriminator: discriminator.wire_name(),
            value,
            fallback,
        });
        if fallback == base.name() {
            return Ok(base);
        }
        self.registry.describe(fallback)
    }
}
