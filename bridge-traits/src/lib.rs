//! # Host Bridge Traits
//!
//! Capability traits the duration pipeline needs from its host.
//!
//! ## Overview
//!
//! The pipeline in `core-service` never talks to the network directly. It
//! depends on the [`HttpClient`](http::HttpClient) trait defined here, and the
//! host injects an implementation: `bridge-desktop` ships the `reqwest` one,
//! tests inject mocks.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should:
//!
//! - Convert library-specific errors to `BridgeError`
//! - Keep the underlying error text, since it is surfaced to API callers
//! - Distinguish timeouts from other transport failures
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` so one client can be shared by every
//! in-flight request.
//!
//! ## Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;

pub use error::BridgeError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
