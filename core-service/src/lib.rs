//! Core service façade and bootstrap helpers.
//!
//! This crate wires the host-provided HTTP bridge and the metadata extractor
//! into the duration pipeline. Native hosts enable the `desktop-shims`
//! feature (which depends on `bridge-desktop`) and call [`bootstrap_desktop`];
//! tests construct [`DurationService`] directly around a mock client.

pub mod error;
pub mod service;

pub use error::{CoreError, DurationError, ErrorKind, Result};
pub use service::{round_to_hundredths, validate_url, DurationService, ResolvedDuration, ServiceOptions};

/// Build a [`DurationService`] backed by the reqwest client.
///
/// ```no_run
/// # fn example() -> Result<(), core_service::CoreError> {
/// use core_runtime::config::ServiceConfig;
///
/// let config = ServiceConfig::builder().build()?;
/// let service = core_service::bootstrap_desktop(&config)?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(
    config: &core_runtime::config::ServiceConfig,
) -> std::result::Result<DurationService, CoreError> {
    use bridge_desktop::{ClientOptions, ReqwestHttpClient};
    use std::sync::Arc;

    let client = ReqwestHttpClient::with_options(ClientOptions {
        user_agent: config.user_agent.clone(),
        timeout: config.fetch_timeout(),
        connect_timeout: config.connect_timeout(),
    })
    .map_err(|e| CoreError::InitializationFailed(e.to_string()))?;

    Ok(DurationService::new(
        Arc::new(client),
        ServiceOptions::from(config),
    ))
}
