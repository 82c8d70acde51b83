//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the duration service:
//! - Logging and tracing infrastructure
//! - Configuration management (builder plus layered file/env loading)
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on. It
//! establishes the logging conventions and the configuration surface shared by
//! the HTTP client, the pipeline and the server binary.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
