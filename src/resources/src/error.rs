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

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the service operations.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The built-in model definitions are invalid.
    ///
    /// This indicates a defect in the client library.
    #[error("cannot initialize the model registry, source={0}")]
    Registry(#[source] model::RegistryError),

    /// A model could not be materialized or canonicalized.
    #[error(transparent)]
    Model(#[from] model::Error),

    /// The request could not be assembled.
    #[error(transparent)]
    Request(#[from] request::Error),

    /// An enumerated parameter received a value outside its closed set.
    #[error("invalid value {value:?} for parameter {name}, must be one of {allowed}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        allowed: String,
    },

    /// The operation requires a model of a different type.
    #[error("{operation} requires a {expected} instance, got {got}")]
    UnexpectedModel {
        operation: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// The response body is not a JSON array.
    #[error("cannot decode list response, source={0}")]
    Decode(#[source] BoxedError),
}
