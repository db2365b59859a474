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

//! Static metadata describing models and their fields.

use crate::enumeration::EnumDescriptor;
use crate::error::RegistryError;
use crate::subtype::Discriminator;
use crate::value::Value;
use std::collections::HashMap;

/// The kind of a scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    /// An RFC 3339 date-time, see [DateTime][crate::DateTime].
    DateTime,
    /// Free-form JSON, kept as an untyped [Value] tree.
    Any,
}

impl ScalarKind {
    pub(crate) fn expected(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Float => "a number",
            Self::Boolean => "a boolean",
            Self::DateTime => "an RFC 3339 date-time",
            Self::Any => "any JSON value",
        }
    }
}

/// The declared type of a field.
///
/// # Example
/// ```
/// # use oci_model::{FieldType, ScalarKind};
/// let t = FieldType::array(FieldType::object("IngressSecurityRule"));
/// assert_eq!(t.referenced_model(), Some("IngressSecurityRule"));
/// assert_eq!(FieldType::map(FieldType::STRING).referenced_model(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarKind),
    /// A nested model, by registered name. The name may be a polymorphic
    /// base type.
    Object(&'static str),
    Array(Box<FieldType>),
    /// A map with string keys.
    Map(Box<FieldType>),
}

impl FieldType {
    pub const STRING: Self = Self::Scalar(ScalarKind::String);
    pub const INTEGER: Self = Self::Scalar(ScalarKind::Integer);
    pub const FLOAT: Self = Self::Scalar(ScalarKind::Float);
    pub const BOOLEAN: Self = Self::Scalar(ScalarKind::Boolean);
    pub const DATE_TIME: Self = Self::Scalar(ScalarKind::DateTime);
    pub const ANY: Self = Self::Scalar(ScalarKind::Any);

    pub fn object(model: &'static str) -> Self {
        Self::Object(model)
    }

    pub fn array(inner: FieldType) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn map(inner: FieldType) -> Self {
        Self::Map(Box::new(inner))
    }

    /// The model referenced by this type, looking through arrays and maps.
    pub fn referenced_model(&self) -> Option<&'static str> {
        match self {
            Self::Scalar(_) => None,
            Self::Object(name) => Some(*name),
            Self::Array(inner) | Self::Map(inner) => inner.referenced_model(),
        }
    }

    pub(crate) fn expected(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.expected(),
            Self::Object(_) | Self::Map(_) => "an object",
            Self::Array(_) => "an array",
        }
    }
}

/// Describes one field of a model.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    local_name: &'static str,
    wire_name: &'static str,
    declared_type: FieldType,
    enumeration: Option<&'static EnumDescriptor>,
    default: Option<Value>,
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    ///
    /// # Parameters
    /// * `local_name` - the idiomatic (snake_case) name used by accessors.
    /// * `wire_name` - the JSON key, typically camelCase.
    /// * `declared_type` - the type used to convert wire values.
    pub fn new(
        local_name: &'static str,
        wire_name: &'static str,
        declared_type: FieldType,
    ) -> Self {
        Self {
            local_name,
            wire_name,
            declared_type,
            enumeration: None,
            default: None,
        }
    }

    /// Restricts the string leaves of this field to a closed set.
    pub fn with_enum(mut self, enumeration: &'static EnumDescriptor) -> Self {
        self.enumeration = Some(enumeration);
        self
    }

    /// Sets the value used when the field is absent.
    pub fn with_default<T: Into<Value>>(mut self, v: T) -> Self {
        self.default = Some(v.into());
        self
    }

    pub fn local_name(&self) -> &'static str {
        self.local_name
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    pub fn enumeration(&self) -> Option<&'static EnumDescriptor> {
        self.enumeration
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Describes a model: its name, its fields in declaration order, and its
/// place in a polymorphic hierarchy.
///
/// Descriptors are created with [ModelBuilder] and registered in a
/// [Registry][crate::Registry]. They are immutable once built.
#[derive(Debug)]
pub struct ModelDescriptor {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    by_local: HashMap<&'static str, usize>,
    by_wire: HashMap<&'static str, usize>,
    discriminator: Option<Discriminator>,
    parent: Option<&'static str>,
    tag: Option<(usize, &'static str)>,
}

impl ModelDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The fields, in declaration order. Subtypes list the inherited fields
    /// first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Finds a field by its local name.
    pub fn field(&self, local_name: &str) -> Option<&FieldDescriptor> {
        self.index_of(local_name).map(|i| &self.fields[i])
    }

    /// Finds a field by its wire name.
    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.by_wire.get(wire_name).map(|i| &self.fields[*i])
    }

    /// The discriminator mapping, only present in polymorphic base types.
    pub fn discriminator(&self) -> Option<&Discriminator> {
        self.discriminator.as_ref()
    }

    /// The base type, only present in subtypes.
    pub fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// The discriminator value this subtype always carries.
    pub fn tag(&self) -> Option<&'static str> {
        self.tag.map(|(_, value)| value)
    }

    pub(crate) fn index_of(&self, local_name: &str) -> Option<usize> {
        self.by_local.get(local_name).copied()
    }

    pub(crate) fn tag_slot(&self) -> Option<(usize, &'static str)> {
        self.tag
    }
}

/// Builds a [ModelDescriptor].
///
/// # Example
/// ```
/// # use oci_model::{FieldDescriptor, FieldType, ModelBuilder};
/// let vcn = ModelBuilder::new("Vcn")
///     .field(FieldDescriptor::new("id", "id", FieldType::STRING))
///     .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING))
///     .build()?;
/// assert_eq!(vcn.fields().len(), 2);
/// assert_eq!(vcn.field_by_wire_name("cidrBlock").map(|f| f.local_name()), Some("cidr_block"));
/// # Ok::<(), oci_model::RegistryError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    discriminator: Option<Discriminator>,
    parent: Option<&'static str>,
    tag: Option<&'static str>,
}

impl ModelBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            discriminator: None,
            parent: None,
            tag: None,
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Makes this model a polymorphic base type.
    pub fn discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    /// Makes this model a subtype of `parent`.
    ///
    /// The parent's fields are prepended when the model is registered.
    pub fn extends(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the discriminator value carried by every instance of this
    /// subtype.
    pub fn tag(mut self, value: &'static str) -> Self {
        self.tag = Some(value);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// Builds a standalone descriptor.
    ///
    /// Subtypes must be built by a [Registry][crate::Registry], which can
    /// find their parent.
    pub fn build(self) -> Result<ModelDescriptor, RegistryError> {
        if let Some(parent) = self.parent {
            return Err(RegistryError::UnknownParent {
                model: self.name.to_string(),
                parent: parent.to_string(),
            });
        }
        self.build_with(None)
    }

    pub(crate) fn build_with(
        self,
        parent: Option<&ModelDescriptor>,
    ) -> Result<ModelDescriptor, RegistryError> {
        let mut fields = parent.map(|p| p.fields.clone()).unwrap_or_default();
        fields.extend(self.fields);

        let mut by_local = HashMap::with_capacity(fields.len());
        let mut by_wire = HashMap::with_capacity(fields.len());
        for (i, f) in fields.iter().enumerate() {
            if by_local.insert(f.local_name, i).is_some() {
                return Err(RegistryError::DuplicateField {
                    model: self.name.to_string(),
                    field: f.local_name.to_string(),
                });
            }
            if by_wire.insert(f.wire_name, i).is_some() {
                return Err(RegistryError::DuplicateWireName {
                    model: self.name.to_string(),
                    wire_name: f.wire_name.to_string(),
                });
            }
        }

        if let Some(d) = &self.discriminator {
            if !by_wire.contains_key(d.wire_name()) {
                return Err(RegistryError::UnknownDiscriminatorField {
                    model: self.name.to_string(),
                    discriminator: d.wire_name().to_string(),
                });
            }
            d.check_unique(self.name)?;
        }

        let tag = match (self.tag, parent) {
            (None, _) => None,
            (Some(value), Some(p)) => {
                let wire_name = p.discriminator().map(|d| d.wire_name()).ok_or_else(|| {
                    RegistryError::MissingDiscriminator {
                        model: self.name.to_string(),
                        parent: p.name.to_string(),
                    }
                })?;
                // The wire key is a parent field, so it is always present.
                by_wire.get(wire_name).map(|i| (*i, value))
            }
            (Some(_), None) => {
                return Err(RegistryError::MissingDiscriminator {
                    model: self.name.to_string(),
                    parent: String::new(),
                });
            }
        };

        Ok(ModelDescriptor {
            name: self.name,
            fields,
            by_local,
            by_wire,
            discriminator: self.discriminator,
            parent: parent.map(|p| p.name),
            tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> FieldDescriptor {
        FieldDescriptor::new("id", "id", FieldType::STRING)
    }

    #[test]
    fn field_lookup() -> anyhow::Result<()> {
        let d = ModelBuilder::new("Budget")
            .field(id())
            .field(FieldDescriptor::new("target_type", "targetType", FieldType::STRING))
            .build()?;
        assert_eq!(d.name(), "Budget");
        assert_eq!(d.field("target_type").map(|f| f.wire_name()), Some("targetType"));
        assert_eq!(d.field_by_wire_name("targetType").map(|f| f.local_name()), Some("target_type"));
        assert!(d.field("targetType").is_none());
        assert!(d.field_by_wire_name("target_type").is_none());
        assert_eq!(d.parent(), None);
        assert_eq!(d.tag(), None);
        Ok(())
    }

    #[test]
    fn duplicate_local_name() {
        let got = ModelBuilder::new("M")
            .field(id())
            .field(FieldDescriptor::new("id", "identifier", FieldType::STRING))
            .build();
        assert!(
            matches!(got, Err(RegistryError::DuplicateField { ref field, .. }) if field == "id"),
            "{got:?}"
        );
    }

    #[test]
    fn duplicate_wire_name() {
        let got = ModelBuilder::new("M")
            .field(id())
            .field(FieldDescriptor::new("identifier", "id", FieldType::STRING))
            .build();
        assert!(
            matches!(got, Err(RegistryError::DuplicateWireName { ref wire_name, .. }) if wire_name == "id"),
            "{got:?}"
        );
    }

    #[test]
    fn discriminator_must_be_a_field() {
        let got = ModelBuilder::new("M")
            .field(id())
            .discriminator(Discriminator::new("kind"))
            .build();
        assert!(
            matches!(got, Err(RegistryError::UnknownDiscriminatorField { .. })),
            "{got:?}"
        );
    }

    #[test]
    fn standalone_subtype_is_rejected() {
        let got = ModelBuilder::new("Sub").extends("Base").build();
        assert!(matches!(got, Err(RegistryError::UnknownParent { .. })), "{got:?}");
    }

    #[test]
    fn tag_without_parent() {
        let got = ModelBuilder::new("M").field(id()).tag("x").build();
        assert!(
            matches!(got, Err(RegistryError::MissingDiscriminator { .. })),
            "{got:?}"
        );
    }

    #[test]
    fn referenced_model() {
        assert_eq!(FieldType::STRING.referenced_model(), None);
        assert_eq!(FieldType::object("A").referenced_model(), Some("A"));
        assert_eq!(
            FieldType::map(FieldType::array(FieldType::object("B"))).referenced_model(),
            Some("B")
        );
    }
}
