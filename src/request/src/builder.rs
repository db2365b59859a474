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

use crate::config::ClientConfig;
use crate::path_parameter::{enc, expand};
use crate::query_parameter::{CollectionFormat, QueryPairs, QueryParameter, RequestParameter};
use crate::Error;
use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method};

/// The header carrying retry tokens.
pub const RETRY_TOKEN_HEADER: &str = "opc-retry-token";

const JSON: &str = "application/json";

/// Assembles the HTTP request for one operation.
///
/// The builder validates the path parameters, formats the query and the
/// headers, and serializes the body. Sending the request is the job of the
/// transport layer.
///
/// # Example
/// ```
/// # use oci_request::{ClientConfig, RequestBuilder};
/// let config = ClientConfig::new("https://iaas.us-phoenix-1.oraclecloud.com/20160918");
/// let request = RequestBuilder::new(&config, "GetVcn", http::Method::GET, "/vcns/{vcnId}")
///     .path_param("vcnId", "ocid1.vcn.oc1.phx.aaaa")
///     .header("opc-request-id", Some("abc123"))
///     .build()?;
/// assert_eq!(
///     request.uri(),
///     "https://iaas.us-phoenix-1.oraclecloud.com/20160918/vcns/ocid1.vcn.oc1.phx.aaaa"
/// );
/// assert_eq!(request.headers()["opc-request-id"], "abc123");
/// # Ok::<(), oci_request::Error>(())
/// ```
#[derive(Debug)]
pub struct RequestBuilder<'c> {
    config: &'c ClientConfig,
    operation: &'static str,
    method: Method,
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: QueryPairs,
    headers: Vec<(String, String)>,
    retry_token: Option<Option<String>>,
    body: Option<Bytes>,
}

impl<'c> RequestBuilder<'c> {
    pub fn new(
        config: &'c ClientConfig,
        operation: &'static str,
        method: Method,
        template: &'static str,
    ) -> Self {
        Self {
            config,
            operation,
            method,
            template,
            path_params: Vec::new(),
            query: QueryPairs::new(),
            headers: Vec::new(),
            retry_token: None,
            body: None,
        }
    }

    /// Sets the value of a `{name}` placeholder in the path template.
    pub fn path_param<V: AsRef<str>>(mut self, name: &'static str, value: V) -> Self {
        self.path_params.push((name, value.as_ref().to_string()));
        self
    }

    /// Adds a query parameter, see [QueryParameter] for the formatting rules.
    pub fn query<T: QueryParameter + ?Sized>(mut self, name: &str, value: &T) -> Self {
        value.add(&mut self.query, name);
        self
    }

    /// Adds a list-valued query parameter using `format`.
    pub fn query_collection<T: RequestParameter>(
        mut self,
        name: &str,
        values: &[T],
        format: CollectionFormat,
    ) -> Self {
        format.add(&mut self.query, name, values);
        self
    }

    /// Adds a header, if `value` is present.
    pub fn header(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.headers.push((name.to_string(), v.to_string()));
        }
        self
    }

    /// Marks the operation as accepting retry tokens.
    ///
    /// The application supplied `token` is used if present. Otherwise a
    /// random token is generated, unless the client configuration disables
    /// retry tokens.
    pub fn retry_token(mut self, token: Option<&str>) -> Self {
        self.retry_token = Some(token.map(str::to_string));
        self
    }

    /// Serializes `body` as the JSON payload of the request.
    pub fn body<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(Error::ser)?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// Assembles the request.
    pub fn build(self) -> Result<http::Request<Bytes>, Error> {
        let params: Vec<(&str, &str)> = self
            .path_params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        let path = expand(self.template, &params)?;
        let mut uri = format!("{}{path}", self.config.endpoint());
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", enc(k), enc(v)))
                .collect::<Vec<_>>()
                .join("&");
            uri.push('?');
            uri.push_str(&query);
        }

        let mut headers = vec![
            ("accept".to_string(), JSON.to_string()),
            ("content-type".to_string(), JSON.to_string()),
        ];
        if let Some(agent) = self.config.user_agent() {
            headers.push(("user-agent".to_string(), agent.to_string()));
        }
        headers.extend(self.headers);
        let token = match self.retry_token {
            Some(Some(token)) => Some(token),
            Some(None) if self.config.retry_tokens() => {
                Some(uuid::Uuid::new_v4().simple().to_string())
            }
            _ => None,
        };
        if let Some(token) = token {
            headers.push((RETRY_TOKEN_HEADER.to_string(), token));
        }

        let mut request = http::Request::builder()
            .method(self.method.clone())
            .uri(&uri)
            .body(self.body.unwrap_or_default())
            .map_err(Error::Request)?;
        for (name, value) in headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::header(&name, e))?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| Error::header(&name, e))?;
            request.headers_mut().append(header_name, header_value);
        }
        tracing::debug!(
            operation = self.operation,
            method = %self.method,
            uri = %uri,
            "assembled request"
        );
        Ok(request)
    }
}
