//! HTTP Client Abstraction
//!
//! Provides the async fetch contract the duration pipeline uses to download
//! remote audio files, plus the request/response value types that cross it.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::Result;

/// Outbound GET request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    /// Abort the download once the body grows past this many bytes
    pub max_body_bytes: Option<u64>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            max_body_bytes: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn user_agent(self, agent: impl Into<String>) -> Self {
        self.header("User-Agent", agent)
    }

    pub fn max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = Some(limit);
        self
    }
}

/// HTTP response with a fully buffered body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status` (e.g. "Not Found"), empty when unknown
    pub reason: String,
    /// Header names are stored lowercase
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Declared `content-type`, if the server sent one
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// Abstracts the outbound fetch so the pipeline can run against `reqwest` in
/// production and against mocks in tests. Implementations must:
/// - Follow redirects and return the final response
/// - Buffer the entire body before returning
/// - Return non-2xx responses as `Ok`, leaving status handling to the caller
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest};
///
/// async fn fetch(client: &dyn HttpClient) -> Result<Bytes> {
///     let request = HttpRequest::get("https://example.com/audio.mp3")
///         .user_agent("MP3-Duration-API/1.0");
///     Ok(client.execute(request).await?.body)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a GET request and buffer the response
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - DNS resolution or connection fails
    /// - TLS validation fails
    /// - Request times out
    /// - The body exceeds `max_body_bytes`
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
