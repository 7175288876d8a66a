//! Domain calls against the permafrust web server.

use log::error;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::Transport;
use crate::transport::ReqwestTransport;

pub const ROOT_DIRECTORIES_PATH: &str = "/root-directories";

/// The calls the presentation layer makes.
#[derive(Debug, Clone)]
pub struct PermafrustApi<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl PermafrustApi<ReqwestTransport> {
    pub fn new(config: ApiConfig) -> Self {
        Self::from_client(ApiClient::new(config))
    }
}

impl<T: Transport> PermafrustApi<T> {
    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Fetch the watched root directories.
    ///
    /// Best effort: a failure is logged at error level and reported as
    /// `None`, which callers cannot tell apart from a missing payload. New
    /// call sites that need the cause should use
    /// [`try_list_root_directories`](Self::try_list_root_directories).
    pub async fn list_root_directories(&self) -> Option<Value> {
        match self.try_list_root_directories().await {
            Ok(directories) => Some(directories),
            Err(err) => {
                error!("listing root directories failed: {err}");
                None
            }
        }
    }

    /// Fetch the watched root directories, returning the failure if any.
    pub async fn try_list_root_directories(&self) -> Result<Value, ApiError> {
        self.client.get(ROOT_DIRECTORIES_PATH, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Serves `{"directories": ["a", "b"]}` for the root-directory listing only.
    struct Fixture;

    #[async_trait]
    impl Transport for Fixture {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let listing = request.method == HttpMethod::Get
                && request.url == "http://localhost:8080/api/root-directories"
                && request.body.is_none();
            let (status, body) = if listing {
                (200, r#"{"directories":["a","b"]}"#)
            } else {
                (404, "")
            };
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            })
        }
    }

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::transport(io::Error::new(io::ErrorKind::NotConnected, "network down")))
        }
    }

    fn api<T: Transport>(transport: T) -> PermafrustApi<T> {
        PermafrustApi::from_client(ApiClient::with_transport(ApiConfig::default(), transport))
    }

    #[tokio::test]
    async fn list_root_directories_returns_body() {
        let listing = api(Fixture).list_root_directories().await;
        assert_eq!(listing, Some(json!({"directories": ["a", "b"]})));
    }

    #[tokio::test]
    async fn list_root_directories_swallows_failure() {
        assert_eq!(api(Offline).list_root_directories().await, None);
    }

    #[tokio::test]
    async fn try_list_root_directories_surfaces_failure() {
        let err = api(Offline).try_list_root_directories().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.to_string(), "transport error: network down");
    }

    #[tokio::test]
    async fn list_root_directories_treats_error_status_as_failure() {
        let config = ApiConfig::new("http://localhost:8080/other");
        let api = PermafrustApi::from_client(ApiClient::with_transport(config, Fixture));
        assert_eq!(api.list_root_directories().await, None);
    }
}
