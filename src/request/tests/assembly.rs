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

#[cfg(test)]
mod tests {
    use model::{FieldDescriptor, FieldType, ModelBuilder, Registry};
    use oci_request::{ClientConfig, RequestBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn instance_body() -> anyhow::Result<()> {
        let registry = Registry::builder()
            .register(
                ModelBuilder::new("CreateVcnDetails")
                    .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING))
                    .field(FieldDescriptor::new("compartment_id", "compartmentId", FieldType::STRING))
                    .field(FieldDescriptor::new("display_name", "displayName", FieldType::STRING)),
            )
            .build()?;
        let details = registry
            .instantiate("CreateVcnDetails")?
            .with("compartment_id", "ocid1.compartment.oc1..a")?
            .with("cidr_block", "10.0.0.0/16")?;

        let config = ClientConfig::new("https://iaas.us-phoenix-1.oraclecloud.com/20160918");
        let request = RequestBuilder::new(&config, "CreateVcn", http::Method::POST, "/vcns")
            .header("opc-request-id", Some("req-1"))
            .retry_token(None)
            .body(&details)?
            .build()?;

        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(
            request.uri(),
            "https://iaas.us-phoenix-1.oraclecloud.com/20160918/vcns"
        );
        assert_eq!(
            std::str::from_utf8(request.body())?,
            r#"{"cidrBlock":"10.0.0.0/16","compartmentId":"ocid1.compartment.oc1..a"}"#
        );
        assert!(request.headers().contains_key("opc-retry-token"));
        Ok(())
    }
}
