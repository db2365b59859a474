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

//! Formatting of query parameters.
//!
//! OCI operations send some of their inputs as query parameters, which may
//! need special formatting:
//! - Simple scalars are formatted as usual.
//! - Date-times are formatted in RFC 3339 format.
//! - [Option] fields that do not contain a value are not included in the
//!   query.
//! - Lists are formatted as repeated query parameters, unless the operation
//!   uses a different [CollectionFormat].
//! - Object values use `field.subfield` format, and may recurse.

use model::{DateTime, Value};

/// The (unencoded) name and value pairs of a query string, in order.
pub type QueryPairs = Vec<(String, String)>;

/// Formats a value as a single query parameter value.
pub trait RequestParameter {
    fn format(&self) -> String;
}

macro_rules! display_parameter {
    ($($t:ty),*) => {
        $(
            impl RequestParameter for $t {
                fn format(&self) -> String {
                    format!("{self}")
                }
            }
        )*
    };
}

display_parameter!(i32, i64, u32, u64, f32, f64, bool, String, &str, DateTime);

/// [QueryParameter] is a trait representing types that can be used as a
/// query parameter.
pub trait QueryParameter {
    fn add(&self, pairs: &mut QueryPairs, name: &str);
}

impl<T: QueryParameter> QueryParameter for Option<T> {
    fn add(&self, pairs: &mut QueryPairs, name: &str) {
        if let Some(t) = self {
            t.add(pairs, name);
        }
    }
}

impl<T: QueryParameter> QueryParameter for Vec<T> {
    fn add(&self, pairs: &mut QueryPairs, name: &str) {
        for e in self {
            e.add(pairs, name);
        }
    }
}

impl<T: RequestParameter> QueryParameter for T {
    fn add(&self, pairs: &mut QueryPairs, name: &str) {
        pairs.push((name.to_string(), self.format()));
    }
}

impl QueryParameter for serde_json::Value {
    fn add(&self, pairs: &mut QueryPairs, name: &str) {
        match self {
            Self::Object(object) => {
                for (k, v) in object {
                    v.add(pairs, &format!("{name}.{k}"));
                }
            }
            Self::Array(array) => {
                for v in array {
                    v.add(pairs, name);
                }
            }
            Self::Null => {}
            Self::String(s) => pairs.push((name.to_string(), s.clone())),
            Self::Number(n) => pairs.push((name.to_string(), n.to_string())),
            Self::Bool(b) => pairs.push((name.to_string(), b.to_string())),
        }
    }
}

impl QueryParameter for Value {
    fn add(&self, pairs: &mut QueryPairs, name: &str) {
        match self {
            Self::Null => {}
            Self::Array(items) => {
                for v in items {
                    v.add(pairs, name);
                }
            }
            Self::Map(entries) => {
                for (k, v) in entries {
                    v.add(pairs, &format!("{name}.{k}"));
                }
            }
            Self::Object(o) => o.to_json().add(pairs, name),
            scalar => pairs.push((name.to_string(), scalar.to_string())),
        }
    }
}

/// How list-valued parameters are sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum CollectionFormat {
    /// One `name=value` pair per element.
    #[default]
    Multi,
    /// Comma separated values.
    Csv,
    /// Space separated values.
    Ssv,
    /// Tab separated values.
    Tsv,
    /// Pipe separated values.
    Pipes,
}

impl CollectionFormat {
    fn separator(&self) -> Option<&'static str> {
        match self {
            Self::Multi => None,
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Tsv => Some("\t"),
            Self::Pipes => Some("|"),
        }
    }

    /// Adds `values` to `pairs` using this format. Empty lists add nothing.
    pub fn add<T: RequestParameter>(&self, pairs: &mut QueryPairs, name: &str, values: &[T]) {
        if values.is_empty() {
            return;
        }
        match self.separator() {
            None => values.iter().for_each(|v| v.add(pairs, name)),
            Some(sep) => {
                let joined = values
                    .iter()
                    .map(RequestParameter::format)
                    .collect::<Vec<_>>()
                    .join(sep);
                pairs.push((name.to_string(), joined));
            }
        }
    }
}
