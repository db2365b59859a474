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

//! Request assembly for OCI service clients.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! Each OCI operation is an HTTP method, a path template, and a set of path,
//! query, and header parameters, plus an optional JSON body. This crate
//! turns those into an [http::Request]. Transport, signing, and retries are
//! handled elsewhere.

mod builder;
pub use builder::*;
mod config;
pub use config::*;
mod error;
pub use error::*;
pub mod path_parameter;
pub mod query_parameter;
pub use query_parameter::CollectionFormat;
