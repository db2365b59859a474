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

//! Advisory diagnostics emitted while marshaling.
//!
//! The engine never fails on values it does not recognize. It substitutes a
//! sentinel, falls back to a base type, or skips the value, and reports what
//! happened through a [Diagnostics] sink. The default sink discards the
//! events, so the presence or absence of a sink never changes the result.

/// An advisory event produced by the marshaling engine.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Diagnostic<'a> {
    /// An enum field received a value outside its closed set.
    UnknownEnumValue {
        /// The enumeration name.
        enumeration: &'static str,
        /// The field local name.
        field: &'a str,
        /// The rejected value, rendered as a string.
        value: &'a str,
        /// The value stored instead.
        sentinel: &'static str,
    },

    /// A polymorphic model received a discriminator without a mapping.
    UnknownSubtype {
        /// The base model type.
        base: &'a str,
        /// The discriminator wire key.
        discriminator: &'static str,
        /// The discriminator value, `None` if missing or not a string.
        value: Option<&'a str>,
        /// The model type used instead.
        fallback: &'a str,
    },

    /// A wire value does not have the shape of the declared field type. The
    /// field is left unset.
    UnexpectedShape {
        /// The model type.
        model: &'a str,
        /// The field local name.
        field: &'a str,
        /// A short description of the expected shape.
        expected: &'static str,
    },
}

/// Receives [Diagnostic] events.
///
/// Implementations must not panic; diagnostics are best-effort. Closures with
/// the right signature implement this trait, which is convenient in tests:
///
/// ```
/// # use oci_model::{Diagnostic, Diagnostics};
/// let seen = std::sync::Mutex::new(Vec::new());
/// let sink = |d: &Diagnostic<'_>| seen.lock().unwrap().push(format!("{d:?}"));
/// sink.emit(&Diagnostic::UnexpectedShape { model: "Vcn", field: "cidr_block", expected: "string" });
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
pub trait Diagnostics: Send + Sync {
    /// Handles a single event.
    fn emit(&self, diagnostic: &Diagnostic<'_>);
}

impl<F> Diagnostics for F
where
    F: Fn(&Diagnostic<'_>) + Send + Sync,
{
    fn emit(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Discards all diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn emit(&self, _diagnostic: &Diagnostic<'_>) {}
}

/// Forwards diagnostics as `tracing` events at `WARN` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::UnknownEnumValue {
                enumeration,
                field,
                value,
                sentinel,
            } => tracing::warn!(
                enumeration,
                field,
                value,
                sentinel,
                "unknown value for enumeration, using sentinel"
            ),
            Diagnostic::UnknownSubtype {
                base,
                discriminator,
                value,
                fallback,
            } => tracing::warn!(
                base,
                discriminator,
                value = value.unwrap_or_default(),
                fallback,
                "subtype not found, using fallback model"
            ),
            Diagnostic::UnexpectedShape {
                model,
                field,
                expected,
            } => tracing::warn!(model, field, expected, "unexpected value shape, field left unset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn sample() -> Diagnostic<'static> {
        Diagnostic::UnknownEnumValue {
            enumeration: "LifecycleState",
            field: "lifecycle_state",
            value: "FROBNICATING",
            sentinel: "UNKNOWN_ENUM_VALUE",
        }
    }

    #[test]
    fn closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |d: &Diagnostic<'_>| seen.lock().unwrap().push(format!("{d:?}"));
        sink.emit(&sample());
        let got = seen.lock().unwrap();
        assert_eq!(got.len(), 1);
        assert!(got[0].contains("FROBNICATING"), "{got:?}");
    }

    #[test]
    fn noop_and_tracing_do_not_panic() {
        NoopDiagnostics.emit(&sample());
        TracingDiagnostics.emit(&sample());
        TracingDiagnostics.emit(&Diagnostic::UnknownSubtype {
            base: "VolumeAttachment",
            discriminator: "attachmentType",
            value: None,
            fallback: "VolumeAttachment",
        });
    }
}
