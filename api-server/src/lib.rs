//! HTTP surface of the MP3 duration service.
//!
//! Routes:
//!
//! | Method    | Path                      | Handler                          |
//! |-----------|---------------------------|----------------------------------|
//! | `POST`    | `/api/get-audio-duration` | [`routes::get_audio_duration`]   |
//! | `OPTIONS` | `/api/get-audio-duration` | [`cors::preflight`]              |
//! | `GET`     | `/`                       | [`harness::index`]               |
//!
//! Every response from the API path carries permissive CORS headers.

pub mod cors;
pub mod error;
pub mod harness;
pub mod routes;

use axum::routing::{get, post};
use axum::{middleware, Router};
use core_service::DurationService;
use std::sync::Arc;

pub use error::{ApiError, ErrorBody};
pub use routes::DurationResponse;

/// Path of the duration endpoint
pub const DURATION_PATH: &str = "/api/get-audio-duration";

/// Build the application router around a shared service.
pub fn router(service: Arc<DurationService>) -> Router {
    let api = Router::new()
        .route(
            DURATION_PATH,
            post(routes::get_audio_duration).options(cors::preflight),
        )
        .layer(middleware::map_response(cors::apply_cors_headers));

    Router::new()
        .route("/", get(harness::index))
        .merge(api)
        .with_state(service)
}
