//! Symbol classification.
//!
//! Maps a raw caller symbol to a provider selection and the
//! provider-specific query key. This heuristic is the single source of
//! truth for routing: purely numeric codes and `.TW`/`.TWO` suffixes go to
//! the Taiwan-market provider, everything else goes to the US/global
//! provider. The function is deterministic and side-effect-free so it can
//! be unit-tested without network access.

use crate::errors::GatewayError;

/// The two upstream provider classes the gateway routes between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Taiwan-market provider (FinMind)
    Tw,
    /// US/global-market provider (Yahoo Finance)
    Us,
}

impl ProviderKind {
    /// Identifier used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tw => "FINMIND",
            Self::Us => "YAHOO",
        }
    }
}

/// Routing decision derived from the caller's raw symbol.
///
/// Computed once per request and immediately consumed by the orchestrator;
/// never cached or persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: ProviderKind,
    /// Provider-specific ticker: the bare numeric code for TW, the
    /// uppercased symbol verbatim for US.
    pub query_key: String,
}

/// Classify a raw symbol into a provider selection.
///
/// The input is trimmed and uppercased. All-digit symbols and symbols
/// carrying a `.TW` or `.TWO` suffix select the TW provider with the suffix
/// stripped; everything else selects the US provider with the uppercased
/// symbol unchanged. Empty or whitespace-only input fails with
/// [`GatewayError::InvalidSymbol`], as does a bare suffix with no code in
/// front of it.
pub fn classify(raw_symbol: &str) -> Result<ProviderSelection, GatewayError> {
    let symbol = raw_symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(GatewayError::InvalidSymbol(raw_symbol.to_string()));
    }

    let all_digits = symbol.chars().all(|c| c.is_ascii_digit());
    if all_digits || symbol.ends_with(".TW") || symbol.ends_with(".TWO") {
        let query_key = symbol
            .strip_suffix(".TWO")
            .or_else(|| symbol.strip_suffix(".TW"))
            .unwrap_or(&symbol);
        // A bare suffix strips to nothing, which would hit the provider
        // with an empty code.
        if query_key.is_empty() {
            return Err(GatewayError::InvalidSymbol(raw_symbol.to_string()));
        }
        return Ok(ProviderSelection {
            provider: ProviderKind::Tw,
            query_key: query_key.to_string(),
        });
    }

    Ok(ProviderSelection {
        provider: ProviderKind::Us,
        query_key: symbol,
    })
}
