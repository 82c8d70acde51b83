//! Workspace placeholder crate.
//!
//! This crate exposes feature flags that map to the individual workspace
//! crates (`core-service`, `core-metadata`). Hosts embedding the duration
//! pipeline can depend on `mp3-duration-workspace` and enable the documented
//! features without wiring each crate individually. The HTTP server lives in
//! the `api-server` crate.

#[cfg(feature = "desktop-shims")]
pub use core_service;

#[cfg(feature = "metadata")]
pub use core_metadata;
