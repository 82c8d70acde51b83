//! Duration endpoint handler.

use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use core_service::{DurationError, DurationService, ResolvedDuration};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

use crate::error::ApiError;
use crate::harness::format_clock;

/// Success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationResponse {
    pub duration: f64,
}

/// `POST /api/get-audio-duration`
///
/// The body is parsed as JSON whatever the request's content type says.
pub async fn get_audio_duration(
    State(service): State<Arc<DurationService>>,
    body: Bytes,
) -> Result<Json<DurationResponse>, ApiError> {
    async move {
        let outcome = AssertUnwindSafe(lookup(&service, &body))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(DurationError::Internal(panic_message(payload))));

        match outcome {
            Ok(resolved) => {
                info!(
                    duration = resolved.seconds,
                    clock = %format_clock(Some(resolved.seconds)),
                    format = %resolved.properties.format,
                    bytes = resolved.properties.byte_len,
                    "Resolved audio duration"
                );
                Ok(Json(DurationResponse {
                    duration: resolved.seconds,
                }))
            }
            Err(err) => {
                let status = err.status_code();
                if status >= 500 {
                    error!(status, kind = ?err.kind(), error = %err, "Duration lookup failed");
                } else {
                    warn!(status, kind = ?err.kind(), error = %err, "Duration lookup rejected");
                }
                Err(ApiError::from(err))
            }
        }
    }
    .instrument(info_span!("get_audio_duration"))
    .await
}

async fn lookup(service: &DurationService, body: &[u8]) -> Result<ResolvedDuration, DurationError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| DurationError::Internal(e.to_string()))?;
    if payload.is_null() {
        return Err(DurationError::Internal(
            "Cannot read property 'url' of a null request body".to_string(),
        ));
    }
    let url = url_candidate(&payload);
    service.resolve(url.as_deref()).await
}

/// Pull the `url` member out of the request body.
///
/// Falsy values (`null`, `false`, `0`, `""`) and a missing member count as
/// absent. Other non-string values are passed on in their JSON text form and
/// fail URL parsing downstream.
fn url_candidate(payload: &Value) -> Option<Cow<'_, str>> {
    match payload.get("url")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}
