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

use crate::error::Error;
use crate::instance::ModelInstance;
use crate::registry::Registry;
use crate::value::Value;

/// Converts [ModelInstance]s back into wire format.
///
/// The output uses wire names, omits unset fields, and keeps explicit nulls.
/// Date-times are rendered in RFC 3339 format.
#[derive(Clone, Copy, Debug)]
pub struct Canonicalizer<'r> {
    registry: &'r Registry,
}

impl<'r> Canonicalizer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Returns the canonical tree for `instance`.
    ///
    /// Fails with [Error::UnknownModel] if `instance`, or any instance nested
    /// in it, was not created from a model of this registry.
    pub fn canonicalize(&self, instance: &ModelInstance) -> Result<serde_json::Value, Error> {
        self.check(instance)?;
        Ok(instance.to_json())
    }

    fn check(&self, instance: &ModelInstance) -> Result<(), Error> {
        if !self.registry.is_registered(instance.descriptor()) {
            return Err(Error::unknown_model(instance.model_name()));
        }
        instance
            .fields()
            .filter_map(|(_, v)| v)
            .try_for_each(|v| self.check_value(v))
    }

    fn check_value(&self, value: &Value) -> Result<(), Error> {
        match value {
            Value::Object(o) => self.check(o),
            Value::Array(items) => items.iter().try_for_each(|v| self.check_value(v)),
            Value::Map(entries) => entries.values().try_for_each(|v| self.check_value(v)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, FieldType, ModelBuilder};
    use crate::materialize::Materializer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn builders() -> Vec<ModelBuilder> {
        vec![
            ModelBuilder::new("Budget")
                .field(FieldDescriptor::new("id", "id", FieldType::STRING))
                .field(FieldDescriptor::new("amount", "amount", FieldType::FLOAT))
                .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
                .field(FieldDescriptor::new(
                    "rules",
                    "alertRules",
                    FieldType::array(FieldType::object("AlertRule")),
                )),
            ModelBuilder::new("AlertRule")
                .field(FieldDescriptor::new("threshold", "threshold", FieldType::FLOAT))
                .field(FieldDescriptor::new("recipients", "recipients", FieldType::STRING)),
        ]
    }

    fn registry() -> anyhow::Result<Registry> {
        let registry = builders()
            .into_iter()
            .fold(Registry::builder(), |b, m| b.register(m))
            .build()?;
        Ok(registry)
    }

    #[test]
    fn round_trip() -> anyhow::Result<()> {
        let registry = registry()?;
        let raw = json!({
            "id": "ocid1.budget.oc1..a",
            "amount": 100.5,
            "timeCreated": "2024-01-02T03:04:05Z",
            "alertRules": [{"threshold": 90.0, "recipients": null}],
        });
        let instance = Materializer::new(&registry)
            .materialize("Budget", &raw)?
            .expect("instance");
        let got = Canonicalizer::new(&registry).canonicalize(&instance)?;
        assert_eq!(got, raw);
        Ok(())
    }

    #[test]
    fn unset_fields_are_omitted() -> anyhow::Result<()> {
        let registry = registry()?;
        let instance = registry.instantiate("Budget")?.with("amount", 1.0)?;
        let got = Canonicalizer::new(&registry).canonicalize(&instance)?;
        assert_eq!(got, json!({"amount": 1.0}));
        Ok(())
    }

    #[test]
    fn foreign_instance() -> anyhow::Result<()> {
        let registry = registry()?;
        let other = self::registry()?;
        let foreign = other.instantiate("Budget")?;
        let got = Canonicalizer::new(&registry).canonicalize(&foreign);
        assert!(matches!(got, Err(Error::UnknownModel(ref m)) if m == "Budget"), "{got:?}");
        Ok(())
    }

    #[test]
    fn foreign_nested_instance() -> anyhow::Result<()> {
        let registry = registry()?;
        let other = self::registry()?;
        let rule = other.instantiate("AlertRule")?.with("threshold", 50.0)?;
        let budget = registry
            .instantiate("Budget")?
            .with("rules", Value::from(vec![rule]))?;
        let got = Canonicalizer::new(&registry).canonicalize(&budget);
        assert!(matches!(got, Err(Error::UnknownModel(ref m)) if m == "AlertRule"), "{got:?}");
        Ok(())
    }
}
