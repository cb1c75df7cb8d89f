//! Provider adapters for the two upstream price-history sources.
//!
//! This module contains:
//! - The `HistoryProvider` trait both adapters implement
//! - The FinMind adapter for Taiwan-market symbols
//! - The Yahoo Finance adapter for US/global symbols
//!
//! Adapters receive a pre-resolved query key; routing from the caller's raw
//! symbol happens in the classifier module, not in the adapters themselves.
//! Each adapter issues exactly one outbound call per invocation and either
//! converts every row of the response into a [`crate::models::Bar`] or fails
//! the whole call.

mod traits;

pub mod finmind;
pub mod yahoo;

pub use finmind::FinMindProvider;
pub use traits::HistoryProvider;
pub use yahoo::YahooProvider;

use std::time::Duration;

use reqwest::{header, StatusCode};

use crate::errors::GatewayError;

/// Browser-like identification sent on every outbound call. Some providers
/// reject obviously-automated clients; this is a resilience measure, not a
/// correctness one, and no test may rely on it.
pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Upper bound on any single outbound call. A timeout is classified as
/// `UpstreamUnavailable`.
pub(crate) const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared outbound HTTP client.
pub(crate) fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(UPSTREAM_TIMEOUT)
        .build()
}

/// Classify an upstream response before parsing its body.
///
/// HTTP 429/403 is treated as a rate-limit rejection; any other non-2xx
/// status is a plain upstream failure. A 2xx response whose content type is
/// not JSON means we were served a block page or HTML interstitial, which is
/// also a rate-limit style rejection. Only responses that pass all three
/// checks get handed to the body parser.
pub(crate) fn check_response(
    provider: &str,
    response: &reqwest::Response,
) -> Result<(), GatewayError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
        return Err(GatewayError::unavailable(
            provider,
            format!("rate limited (HTTP {})", status.as_u16()),
        ));
    }
    if !status.is_success() {
        return Err(GatewayError::unavailable(
            provider,
            format!("HTTP {}", status.as_u16()),
        ));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("json") {
        return Err(GatewayError::unavailable(
            provider,
            format!("expected JSON body, got content type {:?}", content_type),
        ));
    }

    Ok(())
}

/// Classify a failure from reading or decoding the response body.
///
/// `reqwest` reports transport failures during the body read and JSON shape
/// mismatches through the same error type. Only a decode failure means the
/// provider answered with an unrecognized shape; a timeout or a dropped
/// connection mid-body is an availability problem.
pub(crate) fn body_error(provider: &str, error: reqwest::Error) -> GatewayError {
    if error.is_timeout() || error.is_connect() || !error.is_decode() {
        GatewayError::unavailable(provider, error)
    } else {
        GatewayError::parse(provider, error)
    }
}
