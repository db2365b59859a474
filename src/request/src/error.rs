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

/// Errors assembling a request.
///
/// These are detected before any data is sent to the service, and indicate
/// problems with the parameters supplied by the application.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A path parameter is missing or blank.
    #[error("missing required parameter {0}")]
    MissingRequiredParameter(String),

    /// The header name or value is not valid in HTTP.
    #[error("invalid header {name}, source={source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: BoxedError,
    },

    /// The request body cannot be serialized.
    #[error("cannot serialize request body, source={0}")]
    Serialize(#[source] BoxedError),

    /// The assembled request is not valid, typically because the endpoint
    /// is not a valid URI.
    #[error("cannot build request, source={0}")]
    Request(#[source] http::Error),
}

impl Error {
    pub(crate) fn missing<T: Into<String>>(name: T) -> Self {
        Self::MissingRequiredParameter(name.into())
    }

    pub(crate) fn header<E: Into<BoxedError>>(name: &str, source: E) -> Self {
        Self::InvalidHeader {
            name: name.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn ser<E: Into<BoxedError>>(source: E) -> Self {
        Self::Serialize(source.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing() {
        let e = Error::missing("localPeeringGatewayId");
        let fmt = format!("{e}");
        assert!(fmt.contains("localPeeringGatewayId"), "{e:?}");
        assert!(e.source().is_none(), "{e:?}");
    }

    #[test]
    fn header() {
        let source = http::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let e = Error::header("if-match", source);
        let fmt = format!("{e}");
        assert!(fmt.contains("if-match"), "{e:?}");
        assert!(e.source().is_some(), "{e:?}");
    }
}
