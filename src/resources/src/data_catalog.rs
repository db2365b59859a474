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

//! Data Catalog: custom properties.

use model::{EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder};

pub const CUSTOM_PROPERTY_SUMMARY: &str = "CustomPropertySummary";

pub static DATA_TYPE: EnumDescriptor = EnumDescriptor::new(
    "CustomPropertyDataType",
    &["TEXT", "RICH_TEXT", "BOOLEAN", "NUMBER", "DATE"],
);

pub static LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "LifecycleState",
    &[
        "CREATING", "ACTIVE", "INACTIVE", "UPDATING", "DELETING", "DELETED", "FAILED", "MOVING",
    ],
);

pub(crate) fn models() -> Vec<ModelBuilder> {
    vec![
        ModelBuilder::new(CUSTOM_PROPERTY_SUMMARY)
            .field(FieldDescriptor::new("key", "key", FieldType::STRING))
            .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
            .field(FieldDescriptor::new("description", "description", FieldType::STRING))
            .field(
                FieldDescriptor::new("data_type", "dataType", FieldType::STRING)
                    .with_enum(&DATA_TYPE),
            )
            .field(FieldDescriptor::new("namespace_name", "namespaceName", FieldType::STRING))
            .field(
                FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                    .with_enum(&LIFECYCLE_STATE),
            )
            .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
            .field(FieldDescriptor::new("is_sortable", "isSortable", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("is_filterable", "isFilterable", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("is_multi_valued", "isMultiValued", FieldType::BOOLEAN))
            .field(
                FieldDescriptor::new("is_hidden", "isHidden", FieldType::BOOLEAN).with_default(true),
            )
            .field(FieldDescriptor::new("is_editable", "isEditable", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("is_shown_in_list", "isShownInList", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("is_service_defined", "isServiceDefined", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("is_hidden_in_search", "isHiddenInSearch", FieldType::BOOLEAN))
            .field(FieldDescriptor::new("usage_count", "usageCount", FieldType::INTEGER))
            .field(FieldDescriptor::new(
                "allowed_values",
                "allowedValues",
                FieldType::array(FieldType::STRING),
            )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, registry};
    use model::{Canonicalizer, Materializer, Value};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"key": "k"}), Value::Bool(true))]
    #[test_case(json!({"key": "k", "isHidden": false}), Value::Bool(false))]
    #[test_case(json!({"key": "k", "isHidden": null}), Value::Null)]
    fn is_hidden_default(raw: serde_json::Value, want: Value) -> anyhow::Result<()> {
        let summary =
            decode(CUSTOM_PROPERTY_SUMMARY, &serde_json::to_vec(&raw)?)?.expect("an object");
        assert_eq!(summary.get("is_hidden"), Some(&want));
        Ok(())
    }

    #[test]
    fn construct_applies_default() -> anyhow::Result<()> {
        let registry = registry()?;
        let summary = Materializer::new(registry)
            .construct(CUSTOM_PROPERTY_SUMMARY, &json!({"display_name": "Owner"}))?;
        let got = Canonicalizer::new(registry).canonicalize(&summary)?;
        assert_eq!(got, json!({"displayName": "Owner", "isHidden": true}));
        Ok(())
    }
}
