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

//! Substitution of path parameters in request paths.
//!
//! Operations are described by a path template such as
//! `/localPeeringGateways/{localPeeringGatewayId}`. Every placeholder must
//! be given a non-blank value. Values are percent-encoded, so they always
//! form a single path segment.

use crate::Error;

/// Encode everything except the unreserved characters of RFC 3986:
/// ASCII letters, digits, `-`, `.`, `_`, and `~`.
///
/// The encoded string is parsed as an [http::Uri], which rejects any other
/// character in a path segment or query string.
const ENCODED_CHARS: percent_encoding::AsciiSet = percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode a string.
pub(crate) fn enc(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, &ENCODED_CHARS).to_string()
}

/// Replaces each `{name}` placeholder in `template` with the encoded value
/// from `parameters`.
///
/// Fails if a placeholder has no value, or the value is blank.
///
/// # Example
/// ```
/// # use oci_request::path_parameter::expand;
/// let path = expand("/budgets/{budgetId}/alertRules", &[("budgetId", "ocid1.budget.oc1..a b")])?;
/// assert_eq!(path, "/budgets/ocid1.budget.oc1..a%20b/alertRules");
/// # Ok::<(), oci_request::Error>(())
/// ```
pub fn expand(template: &str, parameters: &[(&str, &str)]) -> Result<String, Error> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        let value = parameters
            .iter()
            .find_map(|(k, v)| (*k == name).then_some(*v))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::missing(name))?;
        path.push_str(&rest[..start]);
        path.push_str(&enc(value));
        rest = &rest[start + len + 1..];
    }
    path.push_str(rest);
    Ok(path)
}
