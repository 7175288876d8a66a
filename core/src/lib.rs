//! Async client for the permafrust backup service's REST API.
//!
//! # Overview
//! `ApiClient::dispatch` sends one request against a configured base URL and
//! returns the decoded response body. `get`, `post`, `put` and `delete` fix
//! the method. `PermafrustApi` builds the domain calls on top.
//!
//! # Design
//! - `ApiClient` is stateless: it holds an `ApiConfig` and a `Transport`.
//! - Network I/O sits behind the `Transport` trait; `ReqwestTransport` is the
//!   production implementation and tests inject fakes.
//! - Every request carries an empty `authorization` header. No credential is
//!   ever resolved.
//! - Response bodies are returned as `serde_json::Value`; their shape is
//!   owned by the server.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use api::PermafrustApi;
pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, BoxError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::ReqwestTransport;
