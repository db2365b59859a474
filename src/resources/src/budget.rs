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

//! Budgets: spending limits and alert rules.

use crate::{Error, check_enum, defined_tags, freeform_tags, request_body};
use bytes::Bytes;
use model::{EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder, ModelInstance};
use request::{ClientConfig, RequestBuilder};

pub const BUDGET: &str = "Budget";
pub const BUDGET_SUMMARY: &str = "BudgetSummary";
pub const ALERT_RULE: &str = "AlertRule";
pub const CREATE_BUDGET_DETAILS: &str = "CreateBudgetDetails";

pub static RESET_PERIOD: EnumDescriptor = EnumDescriptor::new("ResetPeriod", &["MONTHLY"]);

pub static TARGET_TYPE: EnumDescriptor =
    EnumDescriptor::new("TargetType", &["COMPARTMENT", "TAG"]);

pub static LIFECYCLE_STATE: EnumDescriptor =
    EnumDescriptor::new("LifecycleState", &["ACTIVE", "INACTIVE"]);

pub static PROCESSING_PERIOD_TYPE: EnumDescriptor =
    EnumDescriptor::new("ProcessingPeriodType", &["INVOICE", "MONTH", "SINGLE_USE"]);

pub static ALERT_TYPE: EnumDescriptor = EnumDescriptor::new("AlertType", &["ACTUAL", "FORECAST"]);

pub static THRESHOLD_TYPE: EnumDescriptor =
    EnumDescriptor::new("ThresholdType", &["PERCENTAGE", "ABSOLUTE"]);

static SORT_ORDER: EnumDescriptor = EnumDescriptor::new("SortOrder", &["ASC", "DESC"]);

static SORT_BY: EnumDescriptor = EnumDescriptor::new("SortBy", &["timeCreated", "displayName"]);

static LIST_TARGET_TYPE: EnumDescriptor =
    EnumDescriptor::new("ListBudgets.TargetType", &["ALL", "COMPARTMENT", "TAG"]);

/// The fields shared by budgets and their summaries.
fn budget_fields(builder: ModelBuilder) -> ModelBuilder {
    builder
        .field(FieldDescriptor::new("id", "id", FieldType::STRING))
        .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
        .field(FieldDescriptor::new("target_compartment_id", "targetCompartmentId", FieldType::STRING))
        .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
        .field(FieldDescriptor::new("description", "description", FieldType::STRING))
        .field(FieldDescriptor::new("amount", "amount", FieldType::FLOAT))
        .field(
            FieldDescriptor::new("reset_period", "resetPeriod", FieldType::STRING)
                .with_enum(&RESET_PERIOD),
        )
        .field(FieldDescriptor::new(
            "budget_processing_period_start_offset",
            "budgetProcessingPeriodStartOffset",
            FieldType::INTEGER,
        ))
        .field(
            FieldDescriptor::new("processing_period_type", "processingPeriodType", FieldType::STRING)
                .with_enum(&PROCESSING_PERIOD_TYPE),
        )
        .field(
            FieldDescriptor::new("target_type", "targetType", FieldType::STRING)
                .with_enum(&TARGET_TYPE),
        )
        .field(FieldDescriptor::new("targets", "targets", FieldType::array(FieldType::STRING)))
        .field(
            FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                .with_enum(&LIFECYCLE_STATE),
        )
        .field(FieldDescriptor::new("alert_rule_count", "alertRuleCount", FieldType::INTEGER))
        .field(FieldDescriptor::new("version", "version", FieldType::INTEGER))
        .field(FieldDescriptor::new("actual_spend", "actualSpend", FieldType::FLOAT))
        .field(FieldDescriptor::new("forecasted_spend", "forecastedSpend", FieldType::FLOAT))
        .field(FieldDescriptor::new("time_spend_computed", "timeSpendComputed", FieldType::DATE_TIME))
        .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
        .field(FieldDescriptor::new("time_updated", "timeUpdated", FieldType::DATE_TIME))
        .field(freeform_tags())
        .field(defined_tags())
}

pub(crate) fn models() -> Vec<ModelBuilder> {
    vec![
        budget_fields(ModelBuilder::new(BUDGET)),
        budget_fields(ModelBuilder::new(BUDGET_SUMMARY)),
        ModelBuilder::new(ALERT_RULE)
            .field(FieldDescriptor::new("id", "id", FieldType::STRING))
            .field(FieldDescriptor::new("budget_id", "budgetId", FieldType::STRING))
            .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
            .field(FieldDescriptor::new("type", "type", FieldType::STRING).with_enum(&ALERT_TYPE))
            .field(FieldDescriptor::new("threshold", "threshold", FieldType::FLOAT))
            .field(
                FieldDescriptor::new("threshold_type", "thresholdType", FieldType::STRING)
                    .with_enum(&THRESHOLD_TYPE),
            )
            .field(
                FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                    .with_enum(&LIFECYCLE_STATE),
            )
            .field(FieldDescriptor::new("recipients", "recipients", FieldType::STRING))
            .field(FieldDescriptor::new("description", "description", FieldType::STRING))
            .field(FieldDescriptor::new("message", "message", FieldType::STRING))
            .field(FieldDescriptor::new("version", "version", FieldType::INTEGER))
            .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
            .field(FieldDescriptor::new("time_updated", "timeUpdated", FieldType::DATE_TIME))
            .field(freeform_tags())
            .field(defined_tags()),
        ModelBuilder::new(CREATE_BUDGET_DETAILS)
            .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
            .field(FieldDescriptor::new("target_compartment_id", "targetCompartmentId", FieldType::STRING))
            .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
            .field(FieldDescriptor::new("description", "description", FieldType::STRING))
            .field(FieldDescriptor::new("amount", "amount", FieldType::FLOAT))
            .field(
                FieldDescriptor::new("reset_period", "resetPeriod", FieldType::STRING)
                    .with_enum(&RESET_PERIOD),
            )
            .field(FieldDescriptor::new(
                "budget_processing_period_start_offset",
                "budgetProcessingPeriodStartOffset",
                FieldType::INTEGER,
            ))
            .field(
                FieldDescriptor::new("target_type", "targetType", FieldType::STRING)
                    .with_enum(&TARGET_TYPE),
            )
            .field(FieldDescriptor::new("targets", "targets", FieldType::array(FieldType::STRING)))
            .field(freeform_tags())
            .field(defined_tags()),
    ]
}

/// Options for [create_budget].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct CreateBudgetOptions {
    pub opc_retry_token: Option<String>,
    pub opc_request_id: Option<String>,
}

impl CreateBudgetOptions {
    pub fn set_opc_retry_token<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_retry_token = Some(v.into());
        self
    }

    pub fn set_opc_request_id<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_request_id = Some(v.into());
        self
    }
}

/// Creates a new budget.
///
/// `create_budget_details` must be a [CREATE_BUDGET_DETAILS]. The response
/// body decodes as a [BUDGET].
pub fn create_budget(
    config: &ClientConfig,
    create_budget_details: &ModelInstance,
    options: &CreateBudgetOptions,
) -> Result<http::Request<Bytes>, Error> {
    let body = request_body("CreateBudget", CREATE_BUDGET_DETAILS, create_budget_details)?;
    let request = RequestBuilder::new(config, "CreateBudget", http::Method::POST, "/budgets")
        .retry_token(options.opc_retry_token.as_deref())
        .header("opc-request-id", options.opc_request_id.as_deref())
        .body(&body)?
        .build()?;
    Ok(request)
}

/// Options for [list_budgets].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ListBudgetsOptions {
    pub limit: Option<i32>,
    pub page: Option<String>,
    /// One of `ASC` or `DESC`.
    pub sort_order: Option<String>,
    /// One of `timeCreated` or `displayName`.
    pub sort_by: Option<String>,
    /// One of `ACTIVE` or `INACTIVE`.
    pub lifecycle_state: Option<String>,
    pub display_name: Option<String>,
    /// One of `ALL`, `COMPARTMENT`, or `TAG`.
    pub target_type: Option<String>,
    pub opc_request_id: Option<String>,
}

impl ListBudgetsOptions {
    pub fn set_limit(mut self, v: i32) -> Self {
        self.limit = Some(v);
        self
    }

    pub fn set_page<T: Into<String>>(mut self, v: T) -> Self {
        self.page = Some(v.into());
        self
    }

    pub fn set_sort_order<T: Into<String>>(mut self, v: T) -> Self {
        self.sort_order = Some(v.into());
        self
    }

    pub fn set_sort_by<T: Into<String>>(mut self, v: T) -> Self {
        self.sort_by = Some(v.into());
        self
    }

    pub fn set_lifecycle_state<T: Into<String>>(mut self, v: T) -> Self {
        self.lifecycle_state = Some(v.into());
        self
    }

    pub fn set_display_name<T: Into<String>>(mut self, v: T) -> Self {
        self.display_name = Some(v.into());
        self
    }

    pub fn set_target_type<T: Into<String>>(mut self, v: T) -> Self {
        self.target_type = Some(v.into());
        self
    }

    pub fn set_opc_request_id<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_request_id = Some(v.into());
        self
    }
}

/// Lists the budgets in a compartment.
///
/// The response body decodes as a list of [BUDGET_SUMMARY], see
/// [decode_list][crate::decode_list].
pub fn list_budgets(
    config: &ClientConfig,
    compartment_id: &str,
    options: &ListBudgetsOptions,
) -> Result<http::Request<Bytes>, Error> {
    if compartment_id.trim().is_empty() {
        return Err(request::Error::MissingRequiredParameter("compartmentId".to_string()).into());
    }
    check_enum("sortOrder", options.sort_order.as_deref(), &SORT_ORDER)?;
    check_enum("sortBy", options.sort_by.as_deref(), &SORT_BY)?;
    check_enum("lifecycleState", options.lifecycle_state.as_deref(), &LIFECYCLE_STATE)?;
    check_enum("targetType", options.target_type.as_deref(), &LIST_TARGET_TYPE)?;
    let request = RequestBuilder::new(config, "ListBudgets", http::Method::GET, "/budgets")
        .query("compartmentId", &compartment_id)
        .query("limit", &options.limit)
        .query("page", &options.page)
        .query("sortOrder", &options.sort_order)
        .query("sortBy", &options.sort_by)
        .query("lifecycleState", &options.lifecycle_state)
        .query("displayName", &options.display_name)
        .query("targetType", &options.target_type)
        .header("opc-request-id", options.opc_request_id.as_deref())
        .build()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, decode_list, registry};
    use model::{Materializer, UNKNOWN_ENUM_VALUE, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn config() -> ClientConfig {
        ClientConfig::new("https://usage.us-ashburn-1.oci.oraclecloud.com/20190111")
    }

    #[test]
    fn decode_budget() -> anyhow::Result<()> {
        let body = json!({
            "id": "ocid1.budget.oc1..a",
            "amount": 500,
            "resetPeriod": "QUARTERLY",
            "targetType": "COMPARTMENT",
            "targets": ["ocid1.compartment.oc1..b"],
            "lifecycleState": "ACTIVE",
            "alertRuleCount": 2,
            "timeCreated": "2019-06-01T00:00:00Z",
        });
        let budget = decode(BUDGET, &serde_json::to_vec(&body)?)?.expect("an object");
        assert_eq!(budget.get("amount"), Some(&Value::Float(500.0)));
        assert_eq!(
            budget.get("reset_period").and_then(Value::as_str),
            Some(UNKNOWN_ENUM_VALUE)
        );
        assert_eq!(budget.get("target_type").and_then(Value::as_str), Some("COMPARTMENT"));
        assert_eq!(budget.get("alert_rule_count").and_then(Value::as_i64), Some(2));
        Ok(())
    }

    #[test]
    fn decode_alert_rules() -> anyhow::Result<()> {
        let body = json!([
            {"id": "a", "type": "ACTUAL", "threshold": 90, "thresholdType": "PERCENTAGE"},
            {"id": "b", "type": "PREDICTED", "threshold": 1000.5, "thresholdType": "ABSOLUTE"},
        ]);
        let rules = decode_list(ALERT_RULE, &serde_json::to_vec(&body)?)?;
        let types: Vec<_> = rules
            .iter()
            .filter_map(|r| r.get("type").and_then(Value::as_str))
            .collect();
        assert_eq!(types, ["ACTUAL", UNKNOWN_ENUM_VALUE]);
        Ok(())
    }

    #[test]
    fn create_budget_request() -> anyhow::Result<()> {
        let registry = registry()?;
        let details = Materializer::new(registry).construct(
            CREATE_BUDGET_DETAILS,
            &json!({
                "compartment_id": "ocid1.tenancy.oc1..a",
                "amount": 100,
                "resetPeriod": "MONTHLY",
                "target_type": "COMPARTMENT",
                "targets": ["ocid1.compartment.oc1..b"],
            }),
        )?;
        let options = CreateBudgetOptions::default().set_opc_request_id("req-1");
        let request = create_budget(&config(), &details, &options)?;
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(
            request.uri(),
            "https://usage.us-ashburn-1.oci.oraclecloud.com/20190111/budgets"
        );
        assert_eq!(request.headers()["opc-request-id"], "req-1");
        assert!(request.headers().contains_key("opc-retry-token"));
        let body: serde_json::Value = serde_json::from_slice(request.body())?;
        assert_eq!(
            body,
            json!({
                "compartmentId": "ocid1.tenancy.oc1..a",
                "amount": 100.0,
                "resetPeriod": "MONTHLY",
                "targetType": "COMPARTMENT",
                "targets": ["ocid1.compartment.oc1..b"],
            })
        );
        Ok(())
    }

    #[test]
    fn assigned_values_round_trip() -> anyhow::Result<()> {
        let registry = registry()?;
        let details = registry
            .instantiate(CREATE_BUDGET_DETAILS)?
            .with("compartment_id", "ocid1.tenancy.oc1..a")?
            .with("amount", 100)?;
        assert_eq!(details.get("amount"), Some(&Value::Float(100.0)));
        let wire = model::Canonicalizer::new(registry).canonicalize(&details)?;
        let again = Materializer::new(registry)
            .materialize(CREATE_BUDGET_DETAILS, &wire)?
            .expect("an object");
        assert_eq!(again, details);

        let got = details.with("amount", "lots");
        assert!(
            matches!(got, Err(model::Error::InvalidValue { ref field, .. }) if field == "amount"),
            "{got:?}"
        );
        Ok(())
    }

    #[test]
    fn create_budget_alias_conflict() -> anyhow::Result<()> {
        let registry = registry()?;
        let got = Materializer::new(registry).construct(
            CREATE_BUDGET_DETAILS,
            &json!({"displayName": "a", "display_name": "b"}),
        );
        assert!(
            matches!(got, Err(model::Error::ConflictingFieldAlias { .. })),
            "{got:?}"
        );
        Ok(())
    }

    #[test]
    fn list_budgets_request() -> anyhow::Result<()> {
        let options = ListBudgetsOptions::default()
            .set_limit(25)
            .set_sort_order("DESC")
            .set_sort_by("displayName")
            .set_target_type("ALL");
        let request = list_budgets(&config(), "ocid1.tenancy.oc1..a", &options)?;
        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(request.uri().path(), "/20190111/budgets");
        assert_eq!(
            request.uri().query(),
            Some("compartmentId=ocid1.tenancy.oc1..a&limit=25&sortOrder=DESC&sortBy=displayName&targetType=ALL")
        );
        Ok(())
    }

    #[test]
    fn list_budgets_display_name_is_encoded() -> anyhow::Result<()> {
        let options = ListBudgetsOptions::default().set_display_name("cost<100 `q` {x}");
        let request = list_budgets(&config(), "ocid1.tenancy.oc1..a", &options)?;
        assert_eq!(
            request.uri().query(),
            Some("compartmentId=ocid1.tenancy.oc1..a&displayName=cost%3C100%20%60q%60%20%7Bx%7D")
        );
        Ok(())
    }

    #[test_case(ListBudgetsOptions::default().set_sort_order("UP"), "sortOrder")]
    #[test_case(ListBudgetsOptions::default().set_sort_by("amount"), "sortBy")]
    #[test_case(ListBudgetsOptions::default().set_lifecycle_state("DELETED"), "lifecycleState")]
    #[test_case(ListBudgetsOptions::default().set_target_type("TENANCY"), "targetType")]
    fn list_budgets_invalid_options(options: ListBudgetsOptions, want: &str) {
        let got = list_budgets(&config(), "ocid1.tenancy.oc1..a", &options);
        assert!(
            matches!(got, Err(Error::InvalidParameter { name, .. }) if name == want),
            "{got:?}"
        );
    }

    #[test]
    fn list_budgets_requires_compartment() {
        let got = list_budgets(&config(), "", &ListBudgetsOptions::default());
        assert!(
            matches!(got, Err(Error::Request(request::Error::MissingRequiredParameter(ref n))) if n == "compartmentId"),
            "{got:?}"
        );
    }
}
