//! Main STACKIT DNS API client implementation.

use crate::api::{RecordSetsApi, ValidationApi, ZonesApi};
use crate::config::ResolvedCredentials;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stackit_dns_core::{Result, StackitError};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The STACKIT DNS API base URL
pub const DEFAULT_BASE_URL: &str = "https://dns.api.stackit.cloud";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// STACKIT DNS API client bound to one project and bearer token
#[derive(Clone)]
pub struct StackitClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    token: String,
    project_id: String,
    base_url: String,
}

impl fmt::Debug for StackitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackitClient")
            .field("project_id", &self.inner.project_id)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl StackitClient {
    /// Create a new client for `project_id` using default settings
    pub fn new(token: impl Into<String>, project_id: impl Into<String>) -> Result<Self> {
        StackitClientBuilder::new(token, project_id).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(token: impl Into<String>, project_id: impl Into<String>) -> StackitClientBuilder {
        StackitClientBuilder::new(token, project_id)
    }

    /// Create a client from resolved credentials
    pub fn from_credentials(credentials: &ResolvedCredentials) -> Result<Self> {
        StackitClientBuilder::from_credentials(credentials).build()
    }

    /// Project every request is scoped to
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access zone endpoints
    #[must_use]
    pub fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access record set endpoints
    #[must_use]
    pub fn rrsets(&self) -> RecordSetsApi<'_> {
        RecordSetsApi::new(self)
    }

    /// Access the DNS-01 validation operations
    #[must_use]
    pub fn validation(&self) -> ValidationApi<'_> {
        ValidationApi::new(self)
    }

    /// Path below the project resource, e.g. `zones/{id}/rrsets`
    pub(crate) fn project_path(&self, rest: &str) -> String {
        format!("/v1/projects/{}/{rest}", self.inner.project_id)
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<ApiResponse> {
        let url = self.build_url(path, params);
        debug!(url = %url, "GET request");

        self.send(self.inner.http.get(&url)).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "POST request");

        self.send(self.inner.http.post(&url).json(body)).await
    }

    /// Perform a PATCH request with JSON body
    pub(crate) async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "PATCH request");

        self.send(self.inner.http.patch(&url).json(body)).await
    }

    /// Perform a DELETE request
    pub(crate) async fn delete(&self, path: &str) -> Result<ApiResponse> {
        let url = self.build_url(path, &[]);
        debug!(url = %url, "DELETE request");

        self.send(self.inner.http.delete(&url)).await
    }

    /// Attach the bearer token, send, and buffer the body
    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .bearer_auth(&self.inner.token)
            .send()
            .await
            .map_err(|e| StackitError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StackitError::Http(e.to_string()))?;

        debug!(status = status.as_u16(), "response received");
        Ok(ApiResponse { status, body })
    }

    /// Build a URL with query parameters
    ///
    /// Keys are sent verbatim since the API's filter syntax (`name[eq]`)
    /// uses brackets; values are form-encoded.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);

        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }
}

/// A buffered API response
#[derive(Debug)]
pub(crate) struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(StackitError::Json)
    }

    /// Numeric status code
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// Builder for configuring a [`StackitClient`]
pub struct StackitClientBuilder {
    token: String,
    project_id: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    http: Option<HttpClient>,
}

impl StackitClientBuilder {
    /// Create a new builder with the given bearer token and project
    #[must_use]
    pub fn new(token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            project_id: project_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("certbot-dns-stackit/{}", env!("CARGO_PKG_VERSION")),
            http: None,
        }
    }

    /// Create a builder from resolved credentials
    #[must_use]
    pub fn from_credentials(credentials: &ResolvedCredentials) -> Self {
        Self::new(credentials.token.clone(), credentials.project_id.clone())
            .base_url(credentials.base_url.clone())
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Use an existing HTTP client instead of building one.
    ///
    /// Timeout and user agent settings are ignored in that case.
    #[must_use]
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<StackitClient> {
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(self.timeout)
                .user_agent(&self.user_agent)
                .gzip(true)
                .build()
                .map_err(|e| StackitError::Http(e.to_string()))?,
        };

        Ok(StackitClient {
            inner: Arc::new(ClientInner {
                http,
                token: self.token,
                project_id: self.project_id,
                base_url: self.base_url,
            }),
        })
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
