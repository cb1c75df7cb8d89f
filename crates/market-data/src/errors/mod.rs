//! Error types for the market data gateway.
//!
//! [`GatewayError`] is the single error enum shared by the classifier, the
//! provider adapters, and the orchestrator. `InvalidSymbol` is the only
//! variant attributable to the caller; every other variant describes a
//! problem with the upstream dependency. `NoData` is special: the
//! orchestrator normalizes it to a successful empty series, so callers
//! never see it as a failure.

use thiserror::Error;

/// Errors that can occur while serving a history request.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The caller supplied an empty or whitespace-only symbol.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// The provider could not be reached, timed out, returned a non-2xx
    /// status, or rejected the call as rate-limited.
    #[error("Upstream unavailable: {provider} - {message}")]
    UpstreamUnavailable {
        /// The provider that was unreachable
        provider: String,
        /// Transport-level detail
        message: String,
    },

    /// The provider answered 2xx but the body did not match the expected shape.
    #[error("Upstream parse error: {provider} - {message}")]
    UpstreamParseError {
        /// The provider that returned the unexpected body
        provider: String,
        /// What failed to parse
        message: String,
    },

    /// The call succeeded but the provider reported zero rows for the range.
    #[error("No data for date range")]
    NoData,
}

impl GatewayError {
    /// Stable tag used as the `error` field of the wire-level failure body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSymbol(_) => "INVALID_SYMBOL",
            Self::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamParseError { .. } => "UPSTREAM_PARSE_ERROR",
            Self::NoData => "NO_DATA",
        }
    }

    /// Whether the error is attributable to the caller rather than to the
    /// upstream dependency.
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::InvalidSymbol(_))
    }

    /// Build an `UpstreamUnavailable` for the given provider.
    pub(crate) fn unavailable(provider: &str, message: impl ToString) -> Self {
        Self::UpstreamUnavailable {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Build an `UpstreamParseError` for the given provider.
    pub(crate) fn parse(provider: &str, message: impl ToString) -> Self {
        Self::UpstreamParseError {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }
}
