//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Production transport over a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build the outgoing `reqwest::Request` without sending it.
    pub fn prepare(&self, request: HttpRequest) -> Result<reqwest::Request, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(ApiError::transport)?;
            let value = HeaderValue::from_str(value).map_err(ApiError::transport)?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let prepared = self.prepare(request)?;
        let response = self.client.execute(prepared).await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: HttpMethod, body: Option<serde_json::Value>) -> HttpRequest {
        HttpRequest {
            method,
            url: "http://localhost:8080/api/root-directories".to_string(),
            headers: vec![("authorization".to_string(), String::new())],
            body,
        }
    }

    #[test]
    fn prepare_sets_method_url_and_empty_authorization() {
        let prepared = ReqwestTransport::default()
            .prepare(request(HttpMethod::Get, None))
            .unwrap();
        assert_eq!(prepared.method(), &reqwest::Method::GET);
        assert_eq!(
            prepared.url().as_str(),
            "http://localhost:8080/api/root-directories"
        );
        let auth = prepared.headers().get("authorization").unwrap();
        assert!(auth.is_empty());
        assert!(prepared.body().is_none());
    }

    #[test]
    fn prepare_attaches_json_body_even_for_get() {
        let prepared = ReqwestTransport::default()
            .prepare(request(HttpMethod::Get, Some(json!({"depth": 2}))))
            .unwrap();
        let bytes = prepared.body().and_then(|b| b.as_bytes()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(body, json!({"depth": 2}));
        assert_eq!(
            prepared.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn prepare_attaches_json_body_for_delete() {
        let prepared = ReqwestTransport::default()
            .prepare(request(HttpMethod::Delete, Some(json!({"dry_run": true}))))
            .unwrap();
        assert_eq!(prepared.method(), &reqwest::Method::DELETE);
        assert!(prepared.body().is_some());
    }

    #[test]
    fn prepare_sends_explicit_null_payload_as_json_null() {
        let prepared = ReqwestTransport::default()
            .prepare(request(HttpMethod::Post, Some(serde_json::Value::Null)))
            .unwrap();
        let bytes = prepared.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(bytes, b"null");
    }

    #[test]
    fn prepare_rejects_unparseable_url() {
        let mut req = request(HttpMethod::Get, None);
        req.url = "not a url".to_string();
        let err = ReqwestTransport::default().prepare(req).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
