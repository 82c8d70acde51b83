//! Duration lookup pipeline.
//!
//! [`DurationService::resolve`] runs one request through
//! validation → fetch → status check → content-type gate → extraction →
//! rounding, stopping at the first failure.

use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_metadata::{AudioProperties, MetadataExtractor};
use core_runtime::config::ServiceConfig;
use core_runtime::logging::loggable_url;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::{DurationError, Result};

/// Per-request knobs of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    /// User-Agent header sent with the fetch
    pub user_agent: String,
    /// Optional cap on the buffered body
    pub max_body_bytes: Option<u64>,
    /// Redact URLs before they reach the logs
    pub redact_urls: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from(&ServiceConfig::default())
    }
}

impl From<&ServiceConfig> for ServiceOptions {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_body_bytes: config.max_body_bytes,
            redact_urls: config.redact_urls,
        }
    }
}

/// Successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDuration {
    /// Duration in seconds rounded to two decimal places
    pub seconds: f64,
    /// Full properties reported by the extractor
    pub properties: AudioProperties,
}

/// Stateless duration lookup service.
///
/// Holds only shared, immutable collaborators, so one instance serves every
/// concurrent request.
pub struct DurationService {
    http_client: Arc<dyn HttpClient>,
    extractor: Arc<MetadataExtractor>,
    options: ServiceOptions,
}

impl DurationService {
    pub fn new(http_client: Arc<dyn HttpClient>, options: ServiceOptions) -> Self {
        Self::with_extractor(http_client, Arc::new(MetadataExtractor::new()), options)
    }

    pub fn with_extractor(
        http_client: Arc<dyn HttpClient>,
        extractor: Arc<MetadataExtractor>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            http_client,
            extractor,
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Resolve the playback duration of the audio file at `raw_url`.
    ///
    /// Performs exactly one outbound fetch when the URL is valid; nothing is
    /// retried or cached.
    ///
    /// # Errors
    ///
    /// Returns the first [`DurationError`] hit by the pipeline.
    pub async fn resolve(&self, raw_url: Option<&str>) -> Result<ResolvedDuration> {
        let url = validate_url(raw_url)?;
        debug!(
            url = %loggable_url(url.as_str(), self.options.redact_urls),
            "Fetching audio file"
        );

        let response = self.fetch(&url).await?;
        check_status(&response)?;
        check_content_type(&response)?;

        debug!(bytes = response.body.len(), "Parsing audio metadata");
        let properties = self.extract(response).await?;

        let duration = properties
            .duration_secs()
            .ok_or(DurationError::MissingDuration)?;

        Ok(ResolvedDuration {
            seconds: round_to_hundredths(duration),
            properties,
        })
    }

    async fn fetch(&self, url: &Url) -> Result<HttpResponse> {
        let mut request = HttpRequest::get(url.as_str()).user_agent(&self.options.user_agent);
        if let Some(limit) = self.options.max_body_bytes {
            request = request.max_body_bytes(limit);
        }

        self.http_client
            .execute(request)
            .await
            .map_err(|e| DurationError::Network(e.to_string()))
    }

    async fn extract(&self, response: HttpResponse) -> Result<AudioProperties> {
        let extractor = Arc::clone(&self.extractor);
        let body = response.body;

        tokio::task::spawn_blocking(move || extractor.extract_from_bytes(&body))
            .await
            .map_err(|e| DurationError::Internal(e.to_string()))?
            .map_err(|e| DurationError::Parse(e.to_string()))
    }
}

/// Check that `raw` is present, non-empty and an absolute URL.
pub fn validate_url(raw: Option<&str>) -> Result<Url> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or(DurationError::UrlRequired)?;
    Url::parse(raw).map_err(|_| DurationError::InvalidUrl)
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    Err(match response.status {
        404 => DurationError::NotFound,
        403 => DurationError::Forbidden,
        status => DurationError::UpstreamStatus {
            status,
            reason: response.reason.clone(),
        },
    })
}

/// A missing content-type passes; a present one must mention `audio/`.
fn check_content_type(response: &HttpResponse) -> Result<()> {
    match response.content_type() {
        Some(content_type) if !content_type.contains("audio/") => {
            Err(DurationError::UnsupportedMediaType)
        }
        _ => Ok(()),
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
