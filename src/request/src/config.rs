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

/// Configure a client.
///
/// Every service client needs the endpoint of the service, for example
/// `https://iaas.us-phoenix-1.oraclecloud.com/20160918`. The defaults for
/// the remaining options work for most applications.
///
/// # Example
/// ```
/// # use oci_request::ClientConfig;
/// let config = ClientConfig::new("https://usage.us-ashburn-1.oci.oraclecloud.com/20190111")
///     .set_user_agent("my-app/1.0")
///     .set_retry_tokens(false);
/// assert!(!config.retry_tokens());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: String,
    retry_tokens: bool,
    user_agent: Option<String>,
}

impl ClientConfig {
    /// Returns a [ClientConfig] for `endpoint`.
    ///
    /// Retry tokens are generated by default.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            retry_tokens: true,
            user_agent: None,
        }
    }

    /// The service endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn retry_tokens(&self) -> bool {
        self.retry_tokens
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Sets the service endpoint.
    pub fn set_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.endpoint = v.into();
        self
    }

    /// Configure the generation of retry tokens.
    ///
    /// Some operations accept a retry token, so the service can recognize
    /// repeated attempts of the same request. When enabled, a random token
    /// is sent unless the application provides one.
    pub fn set_retry_tokens(mut self, v: bool) -> Self {
        self.retry_tokens = v;
        self
    }

    /// Sets the `user-agent` header sent with each request.
    pub fn set_user_agent<T: Into<String>>(mut self, v: T) -> Self {
        self.user_agent = Some(v.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://iaas.us-phoenix-1.oraclecloud.com/20160918/");
        assert_eq!(config.endpoint(), "https://iaas.us-phoenix-1.oraclecloud.com/20160918");
        assert!(config.retry_tokens());
        assert_eq!(config.user_agent(), None);
    }

    #[test]
    fn setters() {
        let config = ClientConfig::new("https://a.example.com")
            .set_endpoint("https://b.example.com")
            .set_retry_tokens(false)
            .set_user_agent("test/1.0");
        assert_eq!(config.endpoint(), "https://b.example.com");
        assert!(!config.retry_tokens());
        assert_eq!(config.user_agent(), Some("test/1.0"));
    }
}
