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

//! Data Integration: data flow operators.

use model::{Discriminator, EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder};

pub const OPERATOR: &str = "Operator";
pub const TASK_OPERATOR: &str = "TaskOperator";
pub const FILTER: &str = "Filter";
pub const FLOW_NODE: &str = "FlowNode";
pub const FOLDER_FILTER: &str = "FolderFilter";
pub const PARENT_REFERENCE: &str = "ParentReference";

pub static TRIGGER_RULE: EnumDescriptor =
    EnumDescriptor::new("TriggerRule", &["ALL_SUCCESS", "ALL_FAILED", "ALL_COMPLETE"]);

pub static TASK_TYPE: EnumDescriptor = EnumDescriptor::new(
    "TaskType",
    &[
        "PIPELINE_TASK",
        "INTEGRATION_TASK",
        "DATA_LOADER_TASK",
        "SQL_TASK",
        "OCI_DATAFLOW_TASK",
        "REST_TASK",
    ],
);

pub static DURATION_UNIT: EnumDescriptor =
    EnumDescriptor::new("DurationUnit", &["SECONDS", "MINUTES", "HOURS", "DAYS"]);

pub(crate) fn models() -> Vec<ModelBuilder> {
    let operator = ModelBuilder::new(OPERATOR)
        .field(FieldDescriptor::new("model_type", "modelType", FieldType::STRING))
        .field(FieldDescriptor::new("key", "key", FieldType::STRING))
        .field(FieldDescriptor::new("model_version", "modelVersion", FieldType::STRING))
        .field(FieldDescriptor::new("parent_ref", "parentRef", FieldType::object(PARENT_REFERENCE)))
        .field(FieldDescriptor::new("name", "name", FieldType::STRING))
        .field(FieldDescriptor::new("identifier", "identifier", FieldType::STRING))
        .field(FieldDescriptor::new("description", "description", FieldType::STRING))
        .field(FieldDescriptor::new("object_version", "objectVersion", FieldType::INTEGER))
        .field(FieldDescriptor::new("input_ports", "inputPorts", FieldType::array(FieldType::ANY)))
        .field(FieldDescriptor::new("output_ports", "outputPorts", FieldType::array(FieldType::ANY)))
        .field(FieldDescriptor::new("object_status", "objectStatus", FieldType::INTEGER))
        .discriminator(
            Discriminator::new("modelType")
                .map("TASK_OPERATOR", TASK_OPERATOR)
                .map("FILTER_OPERATOR", FILTER),
        );

    let task_operator = ModelBuilder::new(TASK_OPERATOR)
        .extends(OPERATOR)
        .tag("TASK_OPERATOR")
        .field(FieldDescriptor::new("retry_attempts", "retryAttempts", FieldType::INTEGER))
        .field(
            FieldDescriptor::new("retry_delay_unit", "retryDelayUnit", FieldType::STRING)
                .with_enum(&DURATION_UNIT),
        )
        .field(FieldDescriptor::new("retry_delay", "retryDelay", FieldType::FLOAT))
        .field(FieldDescriptor::new("expected_duration", "expectedDuration", FieldType::FLOAT))
        .field(
            FieldDescriptor::new("expected_duration_unit", "expectedDurationUnit", FieldType::STRING)
                .with_enum(&DURATION_UNIT),
        )
        .field(
            FieldDescriptor::new("task_type", "taskType", FieldType::STRING).with_enum(&TASK_TYPE),
        )
        .field(
            FieldDescriptor::new("trigger_rule", "triggerRule", FieldType::STRING)
                .with_enum(&TRIGGER_RULE)
                .with_default("ALL_SUCCESS"),
        );

    let filter = ModelBuilder::new(FILTER)
        .extends(OPERATOR)
        .tag("FILTER_OPERATOR")
        .field(FieldDescriptor::new("filter_condition", "filterCondition", FieldType::ANY));

    vec![
        operator,
        task_operator,
        filter,
        ModelBuilder::new(PARENT_REFERENCE)
            .field(FieldDescriptor::new("parent", "parent", FieldType::STRING))
            .field(FieldDescriptor::new("root_doc_id", "rootDocId", FieldType::STRING)),
        ModelBuilder::new(FLOW_NODE)
            .field(FieldDescriptor::new("key", "key", FieldType::STRING))
            .field(FieldDescriptor::new("model_type", "modelType", FieldType::STRING))
            .field(FieldDescriptor::new("model_version", "modelVersion", FieldType::STRING))
            .field(FieldDescriptor::new("parent_ref", "parentRef", FieldType::object(PARENT_REFERENCE)))
            .field(FieldDescriptor::new("name", "name", FieldType::STRING))
            .field(FieldDescriptor::new("description", "description", FieldType::STRING))
            .field(FieldDescriptor::new("input_links", "inputLinks", FieldType::array(FieldType::ANY)))
            .field(FieldDescriptor::new("output_links", "outputLinks", FieldType::array(FieldType::ANY)))
            .field(FieldDescriptor::new("operator", "operator", FieldType::object(OPERATOR)))
            .field(FieldDescriptor::new("ui_properties", "uiProperties", FieldType::ANY))
            .field(FieldDescriptor::new("object_status", "objectStatus", FieldType::INTEGER)),
        ModelBuilder::new(FOLDER_FILTER)
            .field(
                FieldDescriptor::new("folder_name", "folderName", FieldType::STRING).with_default("*"),
            )
            .field(FieldDescriptor::new("is_recursive", "isRecursive", FieldType::BOOLEAN)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, registry};
    use model::{Canonicalizer, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_operator_is_resolved() -> anyhow::Result<()> {
        let raw = json!({
            "key": "node-1",
            "modelType": "FLOW_NODE",
            "parentRef": {"parent": "pipeline-1"},
            "operator": {
                "modelType": "TASK_OPERATOR",
                "key": "op-1",
                "taskType": "SQL_TASK",
                "retryDelayUnit": "FORTNIGHTS",
            },
        });
        let node = decode(FLOW_NODE, &serde_json::to_vec(&raw)?)?.expect("an object");
        let parent = node.get("parent_ref").and_then(Value::as_object).expect("nested");
        assert_eq!(parent.model_name(), PARENT_REFERENCE);
        let operator = node.get("operator").and_then(Value::as_object).expect("nested");
        assert_eq!(operator.model_name(), TASK_OPERATOR);
        assert_eq!(operator.get("task_type").and_then(Value::as_str), Some("SQL_TASK"));
        assert_eq!(
            operator.get("retry_delay_unit").and_then(Value::as_str),
            Some(model::UNKNOWN_ENUM_VALUE)
        );
        assert_eq!(
            operator.get("trigger_rule").and_then(Value::as_str),
            Some("ALL_SUCCESS")
        );
        Ok(())
    }

    #[test]
    fn unknown_operator_falls_back() -> anyhow::Result<()> {
        let raw = json!({"operator": {"modelType": "JOINER_OPERATOR", "key": "op-2"}});
        let node = decode(FLOW_NODE, &serde_json::to_vec(&raw)?)?.expect("an object");
        let operator = node.get("operator").and_then(Value::as_object).expect("nested");
        assert_eq!(operator.model_name(), OPERATOR);
        assert_eq!(
            operator.get("model_type").and_then(Value::as_str),
            Some("JOINER_OPERATOR")
        );
        Ok(())
    }

    #[test]
    fn round_trip_keeps_free_form_fields() -> anyhow::Result<()> {
        let raw = json!({
            "modelType": "FILTER_OPERATOR",
            "key": "op-3",
            "filterCondition": {"expression": "a > 1", "nested": [1, 2.5, null]},
        });
        let filter = decode(OPERATOR, &serde_json::to_vec(&raw)?)?.expect("an object");
        assert_eq!(filter.model_name(), FILTER);
        let got = Canonicalizer::new(registry()?).canonicalize(&filter)?;
        assert_eq!(got, raw);
        Ok(())
    }

    #[test]
    fn folder_filter_default() -> anyhow::Result<()> {
        let filter = registry()?.instantiate(FOLDER_FILTER)?;
        assert_eq!(filter.get("folder_name").and_then(Value::as_str), Some("*"));
        assert_eq!(filter.to_json(), json!({"folderName": "*"}));
        Ok(())
    }
}
