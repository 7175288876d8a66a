//! Request dispatcher for the permafrust REST API.
//!
//! # Design
//! `ApiClient` holds only its `ApiConfig` and a transport, and carries no
//! mutable state between calls. `dispatch` is split into `build_request`,
//! one `Transport::execute` round-trip, and `parse_response`, so the I/O
//! boundary is explicit and the two pure halves can be tested on their own.

use log::debug;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::ReqwestTransport;

/// Stateless client that sends one request per call.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe the request `dispatch` would send.
    ///
    /// Exactly one `/` separates the base URL and `path`. The payload is
    /// attached as-is for every method.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}/{}", self.config.base_url(), path.trim_start_matches('/')),
            headers: self.config.default_headers(),
            body: payload,
        }
    }

    /// Keep only the decoded body of a 2xx response.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Send exactly one request and return the response body.
    ///
    /// Transport failures are returned unchanged; nothing is retried.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, payload);
        debug!("{} {}", request.method, request.url);
        let response = self.transport.execute(request).await?;
        self.parse_response(response)
    }

    pub async fn get(&self, path: &str, payload: Option<Value>) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Get, path, payload).await
    }

    pub async fn post(&self, path: &str, payload: Option<Value>) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Post, path, payload).await
    }

    pub async fn put(&self, path: &str, payload: Option<Value>) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Put, path, payload).await
    }

    pub async fn delete(&self, path: &str, payload: Option<Value>) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Delete, path, payload).await
    }
}
