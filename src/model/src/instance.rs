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

//! Typed model instances.

use crate::descriptor::{FieldDescriptor, ModelDescriptor};
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::Error;
use crate::materialize::conform;
use crate::value::Value;
use std::sync::Arc;

/// An instance of a registered model.
///
/// Each declared field is either *unset* (never assigned), an explicit
/// [Value::Null], or a value. Unset fields are omitted from the wire
/// representation, explicit nulls are sent as `null`.
///
/// # Example
/// ```
/// # use oci_model::{FieldDescriptor, FieldType, ModelBuilder, Registry, Value};
/// let registry = Registry::builder()
///     .register(
///         ModelBuilder::new("Vcn")
///             .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING))
///             .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING)),
///     )
///     .build()?;
/// let vcn = registry.instantiate("Vcn")?.with("cidr_block", "10.0.0.0/16")?;
/// assert_eq!(vcn.get("cidr_block").and_then(Value::as_str), Some("10.0.0.0/16"));
/// assert!(!vcn.is_set("display_name"));
/// assert_eq!(vcn.to_json(), serde_json::json!({"cidrBlock": "10.0.0.0/16"}));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ModelInstance {
    descriptor: Arc<ModelDescriptor>,
    slots: Vec<Option<Value>>,
}

impl ModelInstance {
    /// Creates an instance holding only the field defaults and, for
    /// subtypes, the discriminator tag.
    pub fn new(descriptor: Arc<ModelDescriptor>) -> Self {
        let mut slots: Vec<Option<Value>> = descriptor
            .fields()
            .iter()
            .map(|f| f.default_value().cloned())
            .collect();
        if let Some((index, tag)) = descriptor.tag_slot() {
            slots[index] = Some(Value::from(tag));
        }
        Self { descriptor, slots }
    }

    /// The name of the (resolved) model type.
    pub fn model_name(&self) -> &'static str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// Returns the field value, or `None` if the field is unset or not
    /// declared.
    pub fn get(&self, local_name: &str) -> Option<&Value> {
        self.descriptor
            .index_of(local_name)
            .and_then(|i| self.slots[i].as_ref())
    }

    /// Returns true if the field was assigned, including an explicit null.
    pub fn is_set(&self, local_name: &str) -> bool {
        self.get(local_name).is_some()
    }

    /// Assigns a field.
    ///
    /// The value is converted to the declared field type the same way wire
    /// values are, for example integers assigned to a float field are stored
    /// as floats. Values that have no representation in the declared type
    /// are rejected. Enumerated fields apply the enum guard.
    pub fn set<T: Into<Value>>(&mut self, local_name: &str, v: T) -> Result<(), Error> {
        self.set_with(local_name, v, &NoopDiagnostics)
    }

    /// Like [set][Self::set], reporting enum substitutions to `diagnostics`.
    pub fn set_with<T: Into<Value>>(
        &mut self,
        local_name: &str,
        v: T,
        diagnostics: &dyn Diagnostics,
    ) -> Result<(), Error> {
        let index = self.require(local_name)?;
        let field = &self.descriptor.fields()[index];
        let declared = field.declared_type();
        let value = conform(declared, v.into()).ok_or_else(|| Error::InvalidValue {
            model: self.model_name().to_string(),
            field: field.local_name().to_string(),
            expected: declared.expected(),
        })?;
        let value = match field.enumeration() {
            Some(e) => e.guard(field.local_name(), value, diagnostics),
            None => value,
        };
        self.slots[index] = Some(value);
        Ok(())
    }

    /// Builder-style version of [set][Self::set].
    pub fn with<T: Into<Value>>(mut self, local_name: &str, v: T) -> Result<Self, Error> {
        self.set(local_name, v)?;
        Ok(self)
    }

    /// Marks the field as unset, returning its previous value.
    pub fn clear(&mut self, local_name: &str) -> Result<Option<Value>, Error> {
        let index = self.require(local_name)?;
        Ok(self.slots[index].take())
    }

    /// Iterates over the declared fields and their values, in declaration
    /// order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, Option<&Value>)> {
        self.descriptor
            .fields()
            .iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }

    /// Renders the instance in wire format. Unset fields are omitted.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields()
            .filter_map(|(f, v)| v.map(|v| (f.wire_name().to_string(), v.to_json())))
            .collect();
        serde_json::Value::Object(map)
    }

    pub(crate) fn set_slot(&mut self, index: usize, value: Option<Value>) {
        self.slots[index] = value;
    }

    fn require(&self, local_name: &str) -> Result<usize, Error> {
        self.descriptor
            .index_of(local_name)
            .ok_or_else(|| Error::unknown_field(self.model_name(), local_name))
    }
}

/// Instances are equal if they have the same model type and all their fields
/// compare equal, including which fields are unset.
impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        self.model_name() == other.model_name() && self.slots == other.slots
    }
}

impl Eq for ModelInstance {}

impl std::hash::Hash for ModelInstance {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.model_name().hash(state);
        self.slots.hash(state);
    }
}

/// Implement [`serde`](::serde) serialization for instances, in wire format.
///
/// Fields are written in declaration order using their wire names. Unset
/// fields are skipped.
impl serde::ser::Serialize for ModelInstance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        let count = self.slots.iter().filter(|s| s.is_some()).count();
        let mut map = serializer.serialize_map(Some(count))?;
        for (f, v) in self.fields() {
            if let Some(v) = v {
                map.serialize_entry(f.wire_name(), v)?;
            }
        }
        map.end()
    }
}
