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

//! A [Diagnostics] sink that records what it receives.

use model::{Diagnostic, Diagnostics};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An owned copy of a [Diagnostic].
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    UnknownEnumValue {
        enumeration: String,
        field: String,
        value: String,
    },
    UnknownSubtype {
        base: String,
        value: Option<String>,
        fallback: String,
    },
    UnexpectedShape {
        model: String,
        field: String,
        expected: String,
    },
    /// Any other diagnostic, in its debug format.
    Other(String),
}

impl From<&Diagnostic<'_>> for Recorded {
    fn from(value: &Diagnostic<'_>) -> Self {
        match value {
            Diagnostic::UnknownEnumValue {
                enumeration,
                field,
                value,
                ..
            } => Self::UnknownEnumValue {
                enumeration: enumeration.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            },
            Diagnostic::UnknownSubtype {
                base,
                value,
                fallback,
                ..
            } => Self::UnknownSubtype {
                base: base.to_string(),
                value: value.map(str::to_string),
                fallback: fallback.to_string(),
            },
            Diagnostic::UnexpectedShape {
                model,
                field,
                expected,
            } => Self::UnexpectedShape {
                model: model.to_string(),
                field: field.to_string(),
                expected: expected.to_string(),
            },
            other => Self::Other(format!("{other:?}")),
        }
    }
}

/// Records every diagnostic, in order.
///
/// # Example
/// ```
/// # use oci_test_utils::{DiagnosticLog, Recorded};
/// # use model::{Diagnostic, Diagnostics};
/// let log = DiagnosticLog::default();
/// log.emit(&Diagnostic::UnexpectedShape { model: "Vcn", field: "cidr_block", expected: "a string" });
/// assert_eq!(log.len(), 1);
/// assert!(matches!(&log.take()[0], Recorded::UnexpectedShape { field, .. } if field == "cidr_block"));
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<Recorded>>,
}

impl DiagnosticLog {
    fn lock(&self) -> MutexGuard<'_, Vec<Recorded>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the recorded diagnostics.
    pub fn entries(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    /// Removes and returns the recorded diagnostics.
    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The rejected values of [Recorded::UnknownEnumValue] entries.
    pub fn unknown_enum_values(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Recorded::UnknownEnumValue { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for DiagnosticLog {
    fn emit(&self, diagnostic: &Diagnostic<'_>) {
        self.lock().push(diagnostic.into());
    }
}
