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

//! Converts untyped JSON trees into [ModelInstance]s.

use crate::datetime::DateTime;
use crate::descriptor::{FieldDescriptor, FieldType, ModelDescriptor, ScalarKind};
use crate::diagnostics::{Diagnostic, Diagnostics, NoopDiagnostics};
use crate::error::Error;
use crate::instance::ModelInstance;
use crate::registry::Registry;
use crate::subtype::SubtypeResolver;
use crate::value::Value;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds [ModelInstance]s from decoded payloads.
///
/// The materializer is lenient: values it cannot use are skipped and
/// reported through its [Diagnostics] sink, enum values outside their closed
/// set are replaced by the sentinel, and unmapped discriminators fall back to
/// the base type. It only fails for defects in the model definitions, or for
/// contradictory input to [construct][Self::construct].
///
/// # Example
/// ```
/// # use oci_model::{FieldDescriptor, FieldType, Materializer, ModelBuilder, Registry};
/// # use serde_json::json;
/// let registry = Registry::builder()
///     .register(
///         ModelBuilder::new("Vcn")
///             .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING)),
///     )
///     .build()?;
/// let materializer = Materializer::new(&registry);
/// let vcn = materializer.materialize("Vcn", &json!({"cidrBlock": "10.0.0.0/16"}))?;
/// assert!(vcn.is_some());
/// let none = materializer.materialize("Vcn", &json!("not an object"))?;
/// assert!(none.is_none());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Materializer<'r> {
    registry: &'r Registry,
    diagnostics: &'r dyn Diagnostics,
}

impl std::fmt::Debug for Materializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer")
            .field("registry", &self.registry.model_names())
            .finish_non_exhaustive()
    }
}

impl<'r> Materializer<'r> {
    /// Creates a materializer that discards diagnostics.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            diagnostics: &NoopDiagnostics,
        }
    }

    /// Reports diagnostics to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: &'r dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Materializes a wire payload.
    ///
    /// Returns `Ok(None)` if `raw` is not a JSON object. The concrete type
    /// is resolved from the discriminator, if `model_type` is polymorphic.
    pub fn materialize(&self, model_type: &str, raw: &Json) -> Result<Option<ModelInstance>, Error> {
        let base = self.registry.describe(model_type)?;
        if !raw.is_object() {
            tracing::debug!(model = base.name(), "payload is not an object");
            return Ok(None);
        }
        self.materialize_object(base.name(), raw).map(Some)
    }

    /// Decodes `bytes` as JSON and materializes the result.
    pub fn materialize_slice(
        &self,
        model_type: &str,
        bytes: &[u8],
    ) -> Result<Option<ModelInstance>, Error> {
        let raw: Json = serde_json::from_slice(bytes).map_err(Error::deser)?;
        self.materialize(model_type, &raw)
    }

    /// Constructs an instance of exactly `model_type` from caller supplied
    /// attributes.
    ///
    /// Keys may be wire names or local names. Supplying the same field under
    /// both is an error. There is no subtype dispatch: the caller names the
    /// concrete type, and its tag is kept. A discriminator value that
    /// contradicts the tag is an error. Non-object attributes yield an
    /// instance holding only the defaults.
    pub fn construct(&self, model_type: &str, attributes: &Json) -> Result<ModelInstance, Error> {
        let descriptor = self.registry.describe(model_type)?;
        let mut instance = ModelInstance::new(descriptor.clone());
        let Some(attributes) = attributes.as_object() else {
            return Ok(instance);
        };
        for (index, field) in descriptor.fields().iter().enumerate() {
            let wire = attributes.get(field.wire_name());
            let local = if field.local_name() == field.wire_name() {
                None
            } else {
                attributes.get(field.local_name())
            };
            let raw = match (wire, local) {
                (Some(_), Some(_)) => {
                    return Err(Error::ConflictingFieldAlias {
                        wire: field.wire_name().to_string(),
                        local: field.local_name().to_string(),
                    });
                }
                (Some(v), None) | (None, Some(v)) => v,
                (None, None) => continue,
            };
            if let Some((_, tag)) = descriptor.tag_slot().filter(|(slot, _)| *slot == index) {
                if raw.is_null() || raw.as_str() == Some(tag) {
                    continue;
                }
                return Err(Error::ConflictingDiscriminator {
                    model: descriptor.name().to_string(),
                    field: field.wire_name().to_string(),
                    expected: tag,
                    got: raw.to_string(),
                });
            }
            instance.set_slot(index, self.field_value(&descriptor, field, raw)?);
        }
        Ok(instance)
    }

    fn materialize_object(&self, base: &str, raw: &Json) -> Result<ModelInstance, Error> {
        let descriptor = SubtypeResolver::new(self.registry, self.diagnostics).resolve(base, raw)?;
        let mut instance = ModelInstance::new(descriptor.clone());
        for (index, field) in descriptor.fields().iter().enumerate() {
            if let Some(v) = raw.get(field.wire_name()) {
                instance.set_slot(index, self.field_value(&descriptor, field, v)?);
            }
        }
        Ok(instance)
    }

    /// Converts a present wire value. `None` means the value is unusable and
    /// the field stays unset; defaults do not apply since the key was present.
    fn field_value(
        &self,
        model: &Arc<ModelDescriptor>,
        field: &FieldDescriptor,
        raw: &Json,
    ) -> Result<Option<Value>, Error> {
        let Some(value) = self.convert(model.name(), field, field.declared_type(), raw)? else {
            return Ok(None);
        };
        let value = match field.enumeration() {
            Some(e) => e.guard(field.local_name(), value, self.diagnostics),
            None => value,
        };
        Ok(Some(value))
    }

    fn convert(
        &self,
        model: &str,
        field: &FieldDescriptor,
        declared: &FieldType,
        raw: &Json,
    ) -> Result<Option<Value>, Error> {
        let value = match (declared, raw) {
            (_, Json::Null) => Some(Value::Null),
            (FieldType::Scalar(kind), v) => coerce(*kind, v),
            (FieldType::Object(name), v @ Json::Object(_)) => {
                Some(Value::Object(Box::new(self.materialize_object(name, v)?)))
            }
            (FieldType::Array(inner), Json::Array(items)) => {
                let mut converted = Vec::with_capacity(items.len());
                for item in items {
                    let v = self.convert(model, field, inner, item)?;
                    converted.push(v.unwrap_or(Value::Null));
                }
                Some(Value::Array(converted))
            }
            (FieldType::Map(inner), Json::Object(entries)) => {
                let mut converted = BTreeMap::new();
                for (k, item) in entries {
                    let v = self.convert(model, field, inner, item)?;
                    converted.insert(k.clone(), v.unwrap_or(Value::Null));
                }
                Some(Value::Map(converted))
            }
            _ => None,
        };
        if value.is_none() {
            self.diagnostics.emit(&Diagnostic::UnexpectedShape {
                model,
                field: field.local_name(),
                expected: declared.expected(),
            });
        }
        Ok(value)
    }
}

fn coerce(kind: ScalarKind, raw: &Json) -> Option<Value> {
    match kind {
        ScalarKind::String => match raw {
            Json::String(s) => Some(Value::String(s.clone())),
            Json::Number(n) => Some(Value::String(n.to_string())),
            Json::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ScalarKind::Integer => match raw {
            Json::Number(n) => integer(n).map(Value::Integer),
            Json::String(s) => s.trim().parse::<i64>().ok().map(Value::Integer),
            _ => None,
        },
        ScalarKind::Float => match raw {
            Json::Number(n) => n.as_f64().map(Value::Float),
            Json::String(s) => s.trim().parse::<f64>().ok().map(Value::Float),
            _ => None,
        },
        ScalarKind::Boolean => match raw {
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::String(s) => boolean(s).map(Value::Bool),
            Json::Number(n) => match n.as_i64() {
                Some(1) => Some(Value::Bool(true)),
                Some(0) => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        ScalarKind::DateTime => match raw {
            Json::String(s) => DateTime::parse(s).ok().map(Value::DateTime),
            _ => None,
        },
        ScalarKind::Any => Some(Value::from_json(raw)),
    }
}

fn integer(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    integral(n.as_f64()?)
}

/// Accepts integral floats such as `3.0`, within the range of i64.
fn integral(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some(f as i64);
    }
    None
}

fn boolean(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Converts a caller supplied value to the declared type.
///
/// Applies the same conversions as [coerce], so an assigned value holds what
/// materializing its wire form would produce. Returns `None` if the value
/// cannot be represented in the declared type.
pub(crate) fn conform(declared: &FieldType, value: Value) -> Option<Value> {
    match (declared, value) {
        (_, Value::Null) => Some(Value::Null),
        (FieldType::Scalar(kind), v) => conform_scalar(*kind, v),
        (FieldType::Object(name), Value::Object(o)) => {
            let d = o.descriptor();
            (d.name() == *name || d.parent() == Some(*name)).then_some(Value::Object(o))
        }
        (FieldType::Array(inner), Value::Array(items)) => items
            .into_iter()
            .map(|v| conform(inner, v))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        (FieldType::Map(inner), Value::Map(entries)) => entries
            .into_iter()
            .map(|(k, v)| conform(inner, v).map(|v| (k, v)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Value::Map),
        _ => None,
    }
}

fn conform_scalar(kind: ScalarKind, value: Value) -> Option<Value> {
    match (kind, value) {
        (ScalarKind::Any, v) => Some(Value::from_json(&v.to_json())),
        (_, Value::Float(f)) if !f.is_finite() => None,
        (ScalarKind::String, v @ Value::String(_)) => Some(v),
        (ScalarKind::String, v @ (Value::Integer(_) | Value::Float(_) | Value::Bool(_))) => {
            Some(Value::String(v.to_json().to_string()))
        }
        (ScalarKind::Integer, v @ Value::Integer(_)) => Some(v),
        (ScalarKind::Integer, Value::Float(f)) => integral(f).map(Value::Integer),
        (ScalarKind::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::Integer),
        (ScalarKind::Float, Value::Integer(i)) => Some(Value::Float(i as f64)),
        (ScalarKind::Float, v @ Value::Float(_)) => Some(v),
        (ScalarKind::Float, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float),
        (ScalarKind::Boolean, v @ Value::Bool(_)) => Some(v),
        (ScalarKind::Boolean, Value::String(s)) => boolean(&s).map(Value::Bool),
        (ScalarKind::Boolean, Value::Integer(1)) => Some(Value::Bool(true)),
        (ScalarKind::Boolean, Value::Integer(0)) => Some(Value::Bool(false)),
        (ScalarKind::DateTime, v @ Value::DateTime(_)) => Some(v),
        (ScalarKind::DateTime, Value::String(s)) => DateTime::parse(&s).ok().map(Value::DateTime),
        _ => None,
    }
}
