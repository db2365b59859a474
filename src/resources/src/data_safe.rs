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

//! Data Safe: user assessments.

use crate::{Error, check_enum, defined_tags, freeform_tags};
use bytes::Bytes;
use model::{DateTime, EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder};
use request::{ClientConfig, RequestBuilder};

pub const USER_ASSESSMENT_FILTER: &str = "UserAssessmentFilter";
pub const USER_ASSESSMENT_SUMMARY: &str = "UserAssessmentSummary";

pub static USER_TYPES: EnumDescriptor = EnumDescriptor::new(
    "UserTypes",
    &[
        "ADMIN_PRIVILEGED",
        "APPLICATION",
        "PRIVILEGED",
        "SCHEMA",
        "NON_PRIVILEGED",
    ],
);

pub static ADMIN_ROLES: EnumDescriptor =
    EnumDescriptor::new("AdminRoles", &["PDB_DBA", "DBA", "DV_ADMIN", "AUDIT_ADMIN"]);

pub static ASSESSMENT_TYPE: EnumDescriptor = EnumDescriptor::new(
    "UserAssessmentType",
    &["LATEST", "SAVED", "SAVE_SCHEDULE", "COMPARTMENT"],
);

pub static LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "UserAssessmentLifecycleState",
    &["CREATING", "SUCCEEDED", "UPDATING", "DELETING", "FAILED"],
);

static ACCESS_LEVEL: EnumDescriptor =
    EnumDescriptor::new("AccessLevel", &["RESTRICTED", "ACCESSIBLE"]);

static SORT_ORDER: EnumDescriptor = EnumDescriptor::new("SortOrder", &["ASC", "DESC"]);

static SORT_BY: EnumDescriptor = EnumDescriptor::new("SortBy", &["timeCreated", "displayName"]);

pub(crate) fn models() -> Vec<ModelBuilder> {
    vec![
        ModelBuilder::new(USER_ASSESSMENT_FILTER)
            .field(
                FieldDescriptor::new(
                    "user_types",
                    "userTypes",
                    FieldType::array(FieldType::STRING),
                )
                .with_enum(&USER_TYPES),
            )
            .field(
                FieldDescriptor::new(
                    "admin_roles",
                    "adminRoles",
                    FieldType::array(FieldType::STRING),
                )
                .with_enum(&ADMIN_ROLES),
            )
            .field(FieldDescriptor::new("user_name", "userName", FieldType::STRING))
            .field(FieldDescriptor::new(
                "time_last_login_greater_than_or_equal_to",
                "timeLastLoginGreaterThanOrEqualTo",
                FieldType::DATE_TIME,
            )),
        ModelBuilder::new(USER_ASSESSMENT_SUMMARY)
            .field(FieldDescriptor::new("id", "id", FieldType::STRING))
            .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
            .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
            .field(FieldDescriptor::new("description", "description", FieldType::STRING))
            .field(
                FieldDescriptor::new("type", "type", FieldType::STRING).with_enum(&ASSESSMENT_TYPE),
            )
            .field(
                FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                    .with_enum(&LIFECYCLE_STATE),
            )
            .field(FieldDescriptor::new(
                "target_ids",
                "targetIds",
                FieldType::array(FieldType::STRING),
            ))
            .field(FieldDescriptor::new("is_baseline", "isBaseline", FieldType::BOOLEAN))
            .field(FieldDescriptor::new(
                "is_deviated_from_baseline",
                "isDeviatedFromBaseline",
                FieldType::BOOLEAN,
            ))
            .field(FieldDescriptor::new(
                "ignored_targets",
                "ignoredTargets",
                FieldType::array(FieldType::ANY),
            ))
            .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
            .field(FieldDescriptor::new("time_updated", "timeUpdated", FieldType::DATE_TIME))
            .field(freeform_tags())
            .field(defined_tags()),
    ]
}

/// Options for [list_user_assessments].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ListUserAssessmentsOptions {
    pub compartment_id_in_subtree: Option<bool>,
    /// One of `RESTRICTED` or `ACCESSIBLE`.
    pub access_level: Option<String>,
    pub display_name: Option<String>,
    pub lifecycle_state: Option<String>,
    pub target_id: Option<String>,
    pub is_baseline: Option<bool>,
    pub time_created_greater_than_or_equal_to: Option<DateTime>,
    pub limit: Option<i32>,
    pub page: Option<String>,
    /// One of `ASC` or `DESC`.
    pub sort_order: Option<String>,
    /// One of `timeCreated` or `displayName`.
    pub sort_by: Option<String>,
    pub opc_request_id: Option<String>,
}

impl ListUserAssessmentsOptions {
    pub fn set_compartment_id_in_subtree(mut self, v: bool) -> Self {
        self.compartment_id_in_subtree = Some(v);
        self
    }

    pub fn set_access_level<T: Into<String>>(mut self, v: T) -> Self {
        self.access_level = Some(v.into());
        self
    }

    pub fn set_display_name<T: Into<String>>(mut self, v: T) -> Self {
        self.display_name = Some(v.into());
        self
    }

    pub fn set_lifecycle_state<T: Into<String>>(mut self, v: T) -> Self {
        self.lifecycle_state = Some(v.into());
        self
    }

    pub fn set_target_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_id = Some(v.into());
        self
    }

    pub fn set_is_baseline(mut self, v: bool) -> Self {
        self.is_baseline = Some(v);
        self
    }

    pub fn set_time_created_greater_than_or_equal_to(mut self, v: DateTime) -> Self {
        self.time_created_greater_than_or_equal_to = Some(v);
        self
    }

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

    pub fn set_opc_request_id<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_request_id = Some(v.into());
        self
    }
}

/// Lists the user assessments in a compartment.
///
/// The response body decodes as a list of [USER_ASSESSMENT_SUMMARY].
pub fn list_user_assessments(
    config: &ClientConfig,
    compartment_id: &str,
    options: &ListUserAssessmentsOptions,
) -> Result<http::Request<Bytes>, Error> {
    if compartment_id.trim().is_empty() {
        return Err(request::Error::MissingRequiredParameter("compartmentId".to_string()).into());
    }
    check_enum("accessLevel", options.access_level.as_deref(), &ACCESS_LEVEL)?;
    check_enum("lifecycleState", options.lifecycle_state.as_deref(), &LIFECYCLE_STATE)?;
    check_enum("sortOrder", options.sort_order.as_deref(), &SORT_ORDER)?;
    check_enum("sortBy", options.sort_by.as_deref(), &SORT_BY)?;
    let request = RequestBuilder::new(
        config,
        "ListUserAssessments",
        http::Method::GET,
        "/userAssessments",
    )
    .query("compartmentId", &compartment_id)
    .query("compartmentIdInSubtree", &options.compartment_id_in_subtree)
    .query("accessLevel", &options.access_level)
    .query("displayName", &options.display_name)
    .query("lifecycleState", &options.lifecycle_state)
    .query("targetId", &options.target_id)
    .query("isBaseline", &options.is_baseline)
    .query(
        "timeCreatedGreaterThanOrEqualTo",
        &options.time_created_greater_than_or_equal_to,
    )
    .query("limit", &options.limit)
    .query("page", &options.page)
    .query("sortOrder", &options.sort_order)
    .query("sortBy", &options.sort_by)
    .header("opc-request-id", options.opc_request_id.as_deref())
    .build()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, decode_list};
    use model::{UNKNOWN_ENUM_VALUE, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn config() -> ClientConfig {
        ClientConfig::new("https://datasafe.us-phoenix-1.oci.oraclecloud.com/20181201/")
    }

    #[test]
    fn filter_enum_arrays() -> anyhow::Result<()> {
        let raw = json!({
            "userTypes": ["ADMIN_PRIVILEGED", "SERVICE_ACCOUNT", "SCHEMA"],
            "adminRoles": ["DBA", null, "DV_OWNER"],
        });
        let filter = decode(USER_ASSESSMENT_FILTER, &serde_json::to_vec(&raw)?)?.expect("an object");
        let user_types: Vec<_> = filter
            .get("user_types")
            .and_then(Value::as_array)
            .expect("an array")
            .iter()
            .map(|v| v.as_str())
            .collect();
        assert_eq!(
            user_types,
            [Some("ADMIN_PRIVILEGED"), Some(UNKNOWN_ENUM_VALUE), Some("SCHEMA")]
        );
        let admin_roles = filter
            .get("admin_roles")
            .and_then(Value::as_array)
            .expect("an array");
        assert_eq!(
            admin_roles,
            [
                Value::String("DBA".into()),
                Value::Null,
                Value::String(UNKNOWN_ENUM_VALUE.into())
            ]
        );
        Ok(())
    }

    #[test]
    fn decode_summaries() -> anyhow::Result<()> {
        let raw = json!([{
            "id": "ocid1.datasafeuserassessment.oc1..a",
            "type": "LATEST",
            "lifecycleState": "ARCHIVED",
            "isBaseline": "true",
            "timeCreated": "2024-02-01T12:00:00.000Z",
            "freeformTags": {"team": "security"},
        }]);
        let got = decode_list(USER_ASSESSMENT_SUMMARY, &serde_json::to_vec(&raw)?)?;
        assert_eq!(got.len(), 1);
        let summary = &got[0];
        assert_eq!(summary.get("type").and_then(Value::as_str), Some("LATEST"));
        assert_eq!(
            summary.get("lifecycle_state").and_then(Value::as_str),
            Some(UNKNOWN_ENUM_VALUE)
        );
        assert_eq!(summary.get("is_baseline"), Some(&Value::Bool(true)));
        assert_eq!(
            summary.get("time_created").and_then(Value::as_datetime),
            Some(&DateTime::parse("2024-02-01T12:00:00Z")?)
        );
        Ok(())
    }

    #[test]
    fn list_request() -> anyhow::Result<()> {
        let options = ListUserAssessmentsOptions::default()
            .set_compartment_id_in_subtree(true)
            .set_access_level("ACCESSIBLE")
            .set_is_baseline(false)
            .set_time_created_greater_than_or_equal_to(DateTime::parse("2024-01-01T00:00:00Z")?)
            .set_sort_by("timeCreated")
            .set_opc_request_id("req-2");
        let request = list_user_assessments(&config(), "ocid1.compartment.oc1..a", &options)?;
        assert_eq!(request.method(), http::Method::GET);
        assert_eq!(request.uri().path(), "/20181201/userAssessments");
        assert_eq!(
            request.uri().query(),
            Some(
                "compartmentId=ocid1.compartment.oc1..a\
                 &compartmentIdInSubtree=true\
                 &accessLevel=ACCESSIBLE\
                 &isBaseline=false\
                 &timeCreatedGreaterThanOrEqualTo=2024-01-01T00%3A00%3A00Z\
                 &sortBy=timeCreated"
            )
        );
        assert_eq!(request.headers()["opc-request-id"], "req-2");
        assert!(!request.headers().contains_key("opc-retry-token"));
        assert!(request.body().is_empty());
        Ok(())
    }

    #[test_case(ListUserAssessmentsOptions::default().set_access_level("PUBLIC"), "accessLevel")]
    #[test_case(ListUserAssessmentsOptions::default().set_lifecycle_state("ACTIVE"), "lifecycleState")]
    #[test_case(ListUserAssessmentsOptions::default().set_sort_order("asc"), "sortOrder")]
    #[test_case(ListUserAssessmentsOptions::default().set_sort_by("type"), "sortBy")]
    fn list_invalid_options(options: ListUserAssessmentsOptions, want: &str) {
        let got = list_user_assessments(&config(), "ocid1.compartment.oc1..a", &options);
        assert!(
            matches!(got, Err(Error::InvalidParameter { name, .. }) if name == want),
            "{got:?}"
        );
    }

    #[test]
    fn list_requires_compartment() {
        let got = list_user_assessments(&config(), "  ", &ListUserAssessmentsOptions::default());
        assert!(
            matches!(got, Err(Error::Request(request::Error::MissingRequiredParameter(ref n))) if n == "compartmentId"),
            "{got:?}"
        );
    }
}
