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

//! Closed-set-or-sentinel validation for enumerated string fields.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::value::Value;

/// The sentinel stored in place of enum values the client does not know.
///
/// Services add enum values over time. Older clients keep working: the
/// unrecognized value is replaced by this sentinel and reported as a
/// [Diagnostic::UnknownEnumValue].
pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";

/// Describes the closed set of values accepted by an enumerated field.
///
/// # Example
/// ```
/// # use oci_model::{EnumDescriptor, NoopDiagnostics, UNKNOWN_ENUM_VALUE};
/// static LIFECYCLE_STATE: EnumDescriptor = EnumDescriptor::new(
///     "LocalPeeringGateway.LifecycleState",
///     &["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
/// );
/// let got = LIFECYCLE_STATE.validate("lifecycle_state", "AVAILABLE", &NoopDiagnostics);
/// assert_eq!(got, "AVAILABLE");
/// let got = LIFECYCLE_STATE.validate("lifecycle_state", "FROBNICATING", &NoopDiagnostics);
/// assert_eq!(got, UNKNOWN_ENUM_VALUE);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    name: &'static str,
    values: &'static [&'static str],
    sentinel: &'static str,
}

impl EnumDescriptor {
    /// Creates a descriptor using [UNKNOWN_ENUM_VALUE] as the sentinel.
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            name,
            values,
            sentinel: UNKNOWN_ENUM_VALUE,
        }
    }

    /// Changes the sentinel value.
    pub const fn with_sentinel(mut self, sentinel: &'static str) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// The enumeration name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The permitted values, in declaration order.
    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// The value stored when a candidate is not permitted.
    pub fn sentinel(&self) -> &'static str {
        self.sentinel
    }

    /// Returns true if `candidate` is one of the permitted values.
    pub fn contains(&self, candidate: &str) -> bool {
        self.values.contains(&candidate)
    }

    /// Validates a single candidate value.
    ///
    /// Empty and permitted values are returned unchanged. Any other value is
    /// replaced by the sentinel, and a [Diagnostic::UnknownEnumValue] is sent
    /// to `diagnostics`. This function never fails.
    pub fn validate<'a>(
        &self,
        field: &str,
        candidate: &'a str,
        diagnostics: &dyn Diagnostics,
    ) -> &'a str {
        if candidate.is_empty() || self.contains(candidate) {
            return candidate;
        }
        diagnostics.emit(&Diagnostic::UnknownEnumValue {
            enumeration: self.name,
            field,
            value: candidate,
            sentinel: self.sentinel,
        });
        self.sentinel
    }

    /// Applies [validate][Self::validate] to every string leaf of `value`.
    ///
    /// Arrays are guarded element-wise and maps value-wise: rejected elements
    /// are replaced in place, never dropped, so lengths, order, and keys are
    /// preserved. Nulls pass through. Any other non-string leaf is not a
    /// permitted value and becomes the sentinel.
    pub fn guard(&self, field: &str, value: Value, diagnostics: &dyn Diagnostics) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::String(s) => {
                let checked = self.validate(field, &s, diagnostics);
                if checked == s {
                    Value::String(s)
                } else {
                    Value::String(checked.to_string())
                }
            }
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|v| self.guard(field, v, diagnostics))
                    .collect(),
            ),
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, self.guard(field, v, diagnostics)))
                    .collect(),
            ),
            other => {
                let rendered = other.to_string();
                diagnostics.emit(&Diagnostic::UnknownEnumValue {
                    enumeration: self.name,
                    field,
                    value: &rendered,
                    sentinel: self.sentinel,
                });
                Value::String(self.sentinel.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopDiagnostics;
    use std::sync::Mutex;
    use test_case::test_case;

    static USER_TYPES: EnumDescriptor =
        EnumDescriptor::new("UserType", &["ADMIN_PRIVILEGED", "APPLICATION", "PRIVILEGED"]);

    #[test_case("ADMIN_PRIVILEGED", "ADMIN_PRIVILEGED")]
    #[test_case("PRIVILEGED", "PRIVILEGED")]
    #[test_case("", "")]
    #[test_case("privileged", UNKNOWN_ENUM_VALUE)]
    #[test_case("NEW_FROM_THE_FUTURE", UNKNOWN_ENUM_VALUE)]
    #[test_case(" PRIVILEGED", UNKNOWN_ENUM_VALUE)]
    #[test_case("\u{1F600}\u{0000}\u{FFFD}", UNKNOWN_ENUM_VALUE)]
    fn validate(input: &str, want: &str) {
        let got = USER_TYPES.validate("user_types", input, &NoopDiagnostics);
        assert_eq!(got, want);
    }

    #[test]
    fn validate_reports_rejected_value() {
        let seen = Mutex::new(Vec::new());
        let sink = |d: &Diagnostic<'_>| {
            if let Diagnostic::UnknownEnumValue { field, value, .. } = d {
                seen.lock().unwrap().push((field.to_string(), value.to_string()));
            }
        };
        let got = USER_TYPES.validate("user_types", "NOPE", &sink);
        assert_eq!(got, UNKNOWN_ENUM_VALUE);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("user_types".to_string(), "NOPE".to_string())]
        );
    }

    #[test]
    fn validate_known_is_silent() {
        let count = Mutex::new(0);
        let sink = |_: &Diagnostic<'_>| *count.lock().unwrap() += 1;
        USER_TYPES.validate("user_types", "APPLICATION", &sink);
        USER_TYPES.validate("user_types", "", &sink);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn guard_array_preserves_length_and_order() {
        let input = Value::Array(vec![
            Value::from("PRIVILEGED"),
            Value::from("NOT_A_TYPE"),
            Value::from("APPLICATION"),
            Value::Integer(7),
        ]);
        let got = USER_TYPES.guard("user_types", input, &NoopDiagnostics);
        let want = Value::Array(vec![
            Value::from("PRIVILEGED"),
            Value::from(UNKNOWN_ENUM_VALUE),
            Value::from("APPLICATION"),
            Value::from(UNKNOWN_ENUM_VALUE),
        ]);
        assert_eq!(got, want);
    }

    #[test]
    fn guard_map_preserves_keys() {
        let input = Value::Map(
            [
                ("a".to_string(), Value::from("PRIVILEGED")),
                ("b".to_string(), Value::from("NOPE")),
            ]
            .into(),
        );
        let got = USER_TYPES.guard("by_name", input, &NoopDiagnostics);
        let want = Value::Map(
            [
                ("a".to_string(), Value::from("PRIVILEGED")),
                ("b".to_string(), Value::from(UNKNOWN_ENUM_VALUE)),
            ]
            .into(),
        );
        assert_eq!(got, want);
    }

    #[test]
    fn guard_null() {
        let got = USER_TYPES.guard("user_types", Value::Null, &NoopDiagnostics);
        assert_eq!(got, Value::Null);
    }

    #[test]
    fn custom_sentinel() {
        static E: EnumDescriptor = EnumDescriptor::new("E", &["A"]).with_sentinel("OTHER");
        assert_eq!(E.validate("f", "B", &NoopDiagnostics), "OTHER");
        assert_eq!(E.sentinel(), "OTHER");
        assert_eq!(E.values(), &["A"]);
    }
}
