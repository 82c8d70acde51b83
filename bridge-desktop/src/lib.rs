//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for native hosts
//! (macOS, Windows, Linux servers).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` with rustls, connection pooling, timeouts
//!   and an optional response body cap
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ClientOptions, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::with_options(ClientOptions::default())?);
//! ```

mod http;

pub use http::{ClientOptions, ReqwestHttpClient};
