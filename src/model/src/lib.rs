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

//! Typed model marshaling for OCI REST APIs.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! OCI services exchange JSON documents with camelCase keys. The client
//! libraries describe each document with a static [ModelDescriptor], and
//! this crate converts between the JSON trees and typed [ModelInstance]s:
//!
//! * [Registry] holds the descriptors, keyed by model name.
//! * [EnumDescriptor] validates enumerated fields. Unknown values are
//!   replaced by [UNKNOWN_ENUM_VALUE] instead of failing, so older clients
//!   keep working when a service adds new values.
//! * [SubtypeResolver] picks the concrete model of polymorphic payloads.
//! * [Materializer] builds instances from decoded payloads.
//! * [Canonicalizer] converts instances back to JSON trees.
//!
//! Values the engine cannot use are reported through a [Diagnostics] sink
//! and never fail the conversion.
//!
//! # Example
//! ```
//! # use oci_model::*;
//! # use serde_json::json;
//! static STATE: EnumDescriptor = EnumDescriptor::new("LifecycleState", &["AVAILABLE"]);
//! let registry = Registry::builder()
//!     .register(
//!         ModelBuilder::new("Vcn")
//!             .field(FieldDescriptor::new("cidr_block", "cidrBlock", FieldType::STRING))
//!             .field(
//!                 FieldDescriptor::new("lifecycle_state", "lifecycleState", FieldType::STRING)
//!                     .with_enum(&STATE),
//!             ),
//!     )
//!     .build()?;
//! let raw = json!({"cidrBlock": "10.0.0.0/16", "lifecycleState": "UPDATING"});
//! let vcn = Materializer::new(&registry)
//!     .with_diagnostics(&TracingDiagnostics)
//!     .materialize("Vcn", &raw)?
//!     .expect("an object yields an instance");
//! assert_eq!(vcn.get("lifecycle_state").and_then(Value::as_str), Some(UNKNOWN_ENUM_VALUE));
//! let canonical = Canonicalizer::new(&registry).canonicalize(&vcn)?;
//! assert_eq!(canonical, json!({"cidrBlock": "10.0.0.0/16", "lifecycleState": "UNKNOWN_ENUM_VALUE"}));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod canonicalize;
pub use crate::canonicalize::*;
mod datetime;
pub use crate::datetime::*;
mod descriptor;
pub use crate::descriptor::*;
mod diagnostics;
pub use crate::diagnostics::*;
mod enumeration;
pub use crate::enumeration::*;
mod error;
pub use crate::error::*;
mod instance;
pub use crate::instance::*;
mod materialize;
pub use crate::materialize::*;
mod registry;
pub use crate::registry::*;
mod subtype;
pub use crate::subtype::*;
mod value;
pub use crate::value::*;
