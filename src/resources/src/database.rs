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

//! Database: Autonomous Databases.

use crate::{Error, defined_tags, freeform_tags};
use bytes::Bytes;
use model::{EnumDescriptor, FieldDescriptor, FieldType, ModelBuilder};
use request::{ClientConfig, RequestBuilder};

pub const AUTONOMOUS_DATABASE: &str = "AutonomousDatabase";
pub const AUTONOMOUS_DATABASE_CONNECTION_STRINGS: &str = "AutonomousDatabaseConnectionStrings";

pub static LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
    "AutonomousDatabaseLifecycleState",
    &[
        "PROVISIONING",
        "AVAILABLE",
        "STOPPING",
        "STOPPED",
        "STARTING",
        "TERMINATING",
        "TERMINATED",
        "UNAVAILABLE",
        "RESTORE_IN_PROGRESS",
        "RESTORE_FAILED",
        "BACKUP_IN_PROGRESS",
        "SCALE_IN_PROGRESS",
        "AVAILABLE_NEEDS_ATTENTION",
        "UPDATING",
        "MAINTENANCE_IN_PROGRESS",
    ],
);

pub static DB_WORKLOAD: EnumDescriptor =
    EnumDescriptor::new("DbWorkload", &["OLTP", "DW", "AJD", "APEX"]);

pub static LICENSE_MODEL: EnumDescriptor =
    EnumDescriptor::new("LicenseModel", &["LICENSE_INCLUDED", "BRING_YOUR_OWN_LICENSE"]);

pub(crate) fn models() -> Vec<ModelBuilder> {
    vec![
        ModelBuilder::new(AUTONOMOUS_DATABASE)
            .field(FieldDescriptor::new("id", "id", FieldType::STRING))
            .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
            .field(
                FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
                    .with_enum(&LIFECYCLE_STATE),
            )
            .field(FieldDescriptor::new("lifecycle_details", "lifecycleDetails", FieldType::STRING))
            .field(FieldDescriptor::new("db_name", "dbName", FieldType::STRING))
            .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING))
            .field(FieldDescriptor::new("cpu_core_count", "cpuCoreCount", FieldType::INTEGER))
            .field(FieldDescriptor::new(
                "data_storage_size_in_tbs",
                "dataStorageSizeInTBs",
                FieldType::INTEGER,
            ))
            .field(FieldDescriptor::new("is_free_tier", "isFreeTier", FieldType::BOOLEAN))
            .field(FieldDescriptor::new(
                "is_auto_scaling_enabled",
                "isAutoScalingEnabled",
                FieldType::BOOLEAN,
            ))
            .field(FieldDescriptor::new("time_created", "timeCreated", FieldType::DATE_TIME))
            .field(
                FieldDescriptor::new("db_workload", "dbWorkload", FieldType::STRING)
                    .with_enum(&DB_WORKLOAD),
            )
            .field(
                FieldDescriptor::new("license_model", "licenseModel", FieldType::STRING)
                    .with_enum(&LICENSE_MODEL),
            )
            .field(FieldDescriptor::new(
                "whitelisted_ips",
                "whitelistedIps",
                FieldType::array(FieldType::STRING),
            ))
            .field(FieldDescriptor::new(
                "connection_strings",
                "connectionStrings",
                FieldType::object(AUTONOMOUS_DATABASE_CONNECTION_STRINGS),
            ))
            .field(freeform_tags())
            .field(defined_tags()),
        ModelBuilder::new(AUTONOMOUS_DATABASE_CONNECTION_STRINGS)
            .field(FieldDescriptor::new("high", "high", FieldType::STRING))
            .field(FieldDescriptor::new("medium", "medium", FieldType::STRING))
            .field(FieldDescriptor::new("low", "low", FieldType::STRING))
            .field(FieldDescriptor::new("dedicated", "dedicated", FieldType::STRING))
            .field(FieldDescriptor::new(
                "all_connection_strings",
                "allConnectionStrings",
                FieldType::map(FieldType::STRING),
            )),
    ]
}

/// Options for [get_autonomous_database].
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct GetAutonomousDatabaseOptions {
    pub opc_request_id: Option<String>,
}

impl GetAutonomousDatabaseOptions {
    pub fn set_opc_request_id<T: Into<String>>(mut self, v: T) -> Self {
        self.opc_request_id = Some(v.into());
        self
    }
}

/// Gets the details of the specified Autonomous Database.
///
/// The response body decodes as an [AUTONOMOUS_DATABASE].
pub fn get_autonomous_database(
    config: &ClientConfig,
    autonomous_database_id: &str,
    options: &GetAutonomousDatabaseOptions,
) -> Result<http::Request<Bytes>, Error> {
    let request = RequestBuilder::new(
        config,
        "GetAutonomousDatabase",
        http::Method::GET,
        "/autonomousDatabases/{autonomousDatabaseId}",
    )
    .path_param("autonomousDatabaseId", autonomous_database_id)
    .header("opc-request-id", options.opc_request_id.as_deref())
    .build()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, registry};
    use model::{Canonicalizer, DateTime, UNKNOWN_ENUM_VALUE, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "id": "ocid1.autonomousdatabase.oc1..a",
            "compartmentId": "ocid1.compartment.oc1..b",
            "lifecycleState": "AVAILABLE",
            "dbName": "adb1",
            "cpuCoreCount": 2,
            "dataStorageSizeInTBs": 1,
            "isFreeTier": false,
            "timeCreated": "2023-11-05T08:30:00.123Z",
            "dbWorkload": "LH",
            "licenseModel": "LICENSE_INCLUDED",
            "whitelistedIps": ["10.0.0.0/16", "192.168.1.4"],
            "connectionStrings": {
                "high": "adb.us-ashburn-1.oraclecloud.com:1522/a_high",
                "allConnectionStrings": {
                    "HIGH": "adb.us-ashburn-1.oraclecloud.com:1522/a_high",
                    "LOW": "adb.us-ashburn-1.oraclecloud.com:1522/a_low",
                },
            },
            "freeformTags": {"env": "dev"},
            "definedTags": {"Operations": {"CostCenter": "42", "Owners": ["a", "b"]}},
        })
    }

    #[test]
    fn decode_database() -> anyhow::Result<()> {
        let adb = decode(AUTONOMOUS_DATABASE, &serde_json::to_vec(&body())?)?.expect("an object");
        assert_eq!(adb.get("db_workload").and_then(Value::as_str), Some(UNKNOWN_ENUM_VALUE));
        assert_eq!(
            adb.get("time_created").and_then(Value::as_datetime),
            Some(&DateTime::parse("2023-11-05T08:30:00.123Z")?)
        );
        let strings = adb
            .get("connection_strings")
            .and_then(Value::as_object)
            .expect("nested");
        assert_eq!(strings.model_name(), AUTONOMOUS_DATABASE_CONNECTION_STRINGS);
        let all = strings
            .get("all_connection_strings")
            .and_then(Value::as_map)
            .expect("a map");
        assert_eq!(all.keys().collect::<Vec<_>>(), ["HIGH", "LOW"]);
        let owners = adb
            .get("defined_tags")
            .and_then(Value::as_map)
            .and_then(|m| m.get("Operations"))
            .and_then(Value::as_map)
            .and_then(|m| m.get("Owners"));
        assert_eq!(
            owners,
            Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
        Ok(())
    }

    #[test]
    fn canonical_form_keeps_known_values() -> anyhow::Result<()> {
        let adb = decode(AUTONOMOUS_DATABASE, &serde_json::to_vec(&body())?)?.expect("an object");
        let got = Canonicalizer::new(registry()?).canonicalize(&adb)?;
        let mut want = body();
        want["dbWorkload"] = json!(UNKNOWN_ENUM_VALUE);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn get_request() -> anyhow::Result<()> {
        let config = ClientConfig::new("https://database.us-ashburn-1.oraclecloud.com/20160918");
        let request = get_autonomous_database(
            &config,
            "ocid1.autonomousdatabase.oc1..a",
            &GetAutonomousDatabaseOptions::default(),
        )?;
        assert_eq!(
            request.uri(),
            "https://database.us-ashburn-1.oraclecloud.com/20160918/autonomousDatabases/ocid1.autonomousdatabase.oc1..a"
        );
        assert!(!request.headers().contains_key("opc-request-id"));
        let got = get_autonomous_database(&config, "", &GetAutonomousDatabaseOptions::default());
        assert!(
            matches!(got, Err(Error::Request(request::Error::MissingRequiredParameter(_)))),
            "{got:?}"
        );
        Ok(())
    }
}
