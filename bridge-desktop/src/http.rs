//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpRequest, HttpResponse},
};
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Identifying User-Agent sent with every outbound fetch
pub const DEFAULT_USER_AGENT: &str = "MP3-Duration-API/1.0";

/// Construction options for [`ReqwestHttpClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    /// Whole-request timeout; `None` leaves the fetch unbounded
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - Redirect following (reqwest default policy)
/// - TLS support via rustls
/// - A single attempt per request, no retries
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    /// Create a new HTTP client with custom options
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(10)
            .user_agent(options.user_agent);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            BridgeError::OperationFailed(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut req = self.client.get(&request.url);

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        req
    }

    /// Convert a reqwest error, keeping the whole source chain in the message
    fn convert_error(error: reqwest::Error) -> BridgeError {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if error.is_timeout() {
            BridgeError::Timeout(message)
        } else {
            BridgeError::Network(message)
        }
    }

    /// Non-ASCII header bytes are kept, decoded lossily.
    fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut collected = HashMap::new();
        for (name, value) in headers {
            collected
                .entry(name.as_str().to_string())
                .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        collected
    }

    /// Reason phrase as sent by the upstream, else the canonical one.
    fn reason_phrase(response: &reqwest::Response) -> String {
        match response.extensions().get::<hyper::ext::ReasonPhrase>() {
            Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
            None => response
                .status()
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
        }
    }

    async fn read_body(mut response: reqwest::Response, limit: Option<u64>) -> Result<Bytes> {
        let Some(limit) = limit else {
            return response.bytes().await.map_err(Self::convert_error);
        };

        if response.content_length().is_some_and(|len| len > limit) {
            return Err(BridgeError::BodyTooLarge { limit });
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(Self::convert_error)? {
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(BridgeError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, "Executing HTTP request");

        let response = self
            .build_request(&request)
            .send()
            .await
            .map_err(|e| {
                let error = Self::convert_error(e);
                warn!(error = %error, "HTTP request failed");
                error
            })?;

        let status = response.status();
        let reason = Self::reason_phrase(&response);
        let headers = Self::collect_headers(response.headers());
        let body = Self::read_body(response, request.max_body_bytes).await?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "HTTP response received"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}
