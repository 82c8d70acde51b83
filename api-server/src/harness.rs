//! Browser test harness served at `/`.
//!
//! A single static page that posts a URL to the duration endpoint and renders
//! the result. The formatting helpers below define the display rules the
//! page's script follows.

use axum::response::Html;

/// Static harness page
pub const PAGE: &str = include_str!("../assets/harness.html");

/// Placeholder shown when no duration is available
pub const EMPTY_CLOCK: &str = "--:--";

pub async fn index() -> Html<&'static str> {
    Html(PAGE)
}

/// Format seconds as zero-padded `MM:SS`, truncating fractions.
///
/// Minutes are not capped, so an 80 minute file renders as `80:00`.
pub fn format_clock(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let whole = s.trunc() as u64;
            format!("{:02}:{:02}", whole / 60, whole % 60)
        }
        _ => EMPTY_CLOCK.to_string(),
    }
}

/// Format seconds with exactly two decimals, e.g. `125.46 seconds`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.2} seconds")
}
