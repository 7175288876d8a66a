//! Client configuration.

/// Base URL the permafrust web server listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Name of the credential header attached to every request.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Settings shared by every call made through one `ApiClient`.
///
/// Built once at startup and passed to the client. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request.
    ///
    /// The credential is always empty: no token is ever looked up. Servers
    /// that enforce authentication will reject these calls.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        vec![(AUTHORIZATION_HEADER.to_string(), String::new())]
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
