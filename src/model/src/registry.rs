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

//! The process-wide, read-only collection of model descriptors.

use crate::descriptor::{ModelBuilder, ModelDescriptor};
use crate::error::{Error, RegistryError};
use crate::instance::ModelInstance;
use std::collections::HashMap;
use std::sync::Arc;

/// Holds the descriptors of all known models.
///
/// A registry is built once and never mutated afterwards, so it can be shared
/// across threads without locking. Applications typically keep one in a
/// `static` initialized through [std::sync::LazyLock].
///
/// # Example
/// ```
/// # use oci_model::{FieldDescriptor, FieldType, ModelBuilder, Registry};
/// let registry = Registry::builder()
///     .register(
///         ModelBuilder::new("Vcn")
///             .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING)),
///     )
///     .build()?;
/// let vcn = registry.describe("Vcn")?;
/// assert_eq!(vcn.name(), "Vcn");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    models: HashMap<&'static str, Arc<ModelDescriptor>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the descriptor for `model_type`.
    pub fn describe(&self, model_type: &str) -> Result<Arc<ModelDescriptor>, Error> {
        self.models
            .get(model_type)
            .cloned()
            .ok_or_else(|| Error::unknown_model(model_type))
    }

    pub fn contains(&self, model_type: &str) -> bool {
        self.models.contains_key(model_type)
    }

    /// The registered model names, sorted.
    pub fn model_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.models.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Creates an instance of `model_type` holding only its defaults (and,
    /// for subtypes, the discriminator tag).
    pub fn instantiate(&self, model_type: &str) -> Result<ModelInstance, Error> {
        self.describe(model_type).map(ModelInstance::new)
    }

    /// Returns true if `descriptor` is the one registered under its name.
    pub(crate) fn is_registered(&self, descriptor: &Arc<ModelDescriptor>) -> bool {
        self.models
            .get(descriptor.name())
            .is_some_and(|d| Arc::ptr_eq(d, descriptor))
    }
}

/// Collects [ModelBuilder]s and validates them as a whole.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    builders: Vec<ModelBuilder>,
}

impl RegistryBuilder {
    pub fn register(mut self, model: ModelBuilder) -> Self {
        self.builders.push(model);
        self
    }

    /// Builds the registry.
    ///
    /// Subtypes may be registered before or after their parent. The build
    /// fails if any model name is repeated, any parent is missing, or any
    /// field or discriminator references a model that is not registered.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut seen = std::collections::HashSet::new();
        for b in &self.builders {
            if !seen.insert(b.name()) {
                return Err(RegistryError::DuplicateModel(b.name().to_string()));
            }
        }

        let mut models: HashMap<&'static str, Arc<ModelDescriptor>> = HashMap::new();
        let mut pending = self.builders;
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for b in pending {
                let parent = match b.parent() {
                    None => None,
                    Some(p) => match models.get(p) {
                        Some(d) => Some(d.clone()),
                        None => {
                            deferred.push(b);
                            continue;
                        }
                    },
                };
                let descriptor = b.build_with(parent.as_deref())?;
                models.insert(descriptor.name(), Arc::new(descriptor));
            }
            if deferred.len() == before {
                // Every remaining model waits on a parent that never appears.
                let b = &deferred[0];
                return Err(RegistryError::UnknownParent {
                    model: b.name().to_string(),
                    parent: b.parent().unwrap_or_default().to_string(),
                });
            }
            pending = deferred;
        }

        let registry = Registry { models };
        registry.check_references()?;
        Ok(registry)
    }
}

impl Registry {
    fn check_references(&self) -> Result<(), RegistryError> {
        for model in self.models.values() {
            for field in model.fields() {
                if let Some(target) = field.declared_type().referenced_model() {
                    if !self.contains(target) {
                        return Err(RegistryError::UnresolvedReference {
                            model: model.name().to_string(),
                            field: field.local_name().to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }
            let Some(d) = model.discriminator() else {
                continue;
            };
            let targets = d
                .mapping()
                .iter()
                .copied()
                .chain(std::iter::once(("<default>", d.default_model(model.name()))));
            for (value, target) in targets {
                if !self.contains(target) {
                    return Err(RegistryError::UnresolvedSubtype {
                        model: model.name().to_string(),
                        discriminator: d.wire_name().to_string(),
                        value: value.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
