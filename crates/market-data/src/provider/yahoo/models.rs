//! Wire models for the Yahoo Finance v8 chart endpoint.
//!
//! Every field is optional or defaulted on purpose: the chart payload
//! drifts over time and a missing ancillary field must not abort the whole
//! request. Only genuinely malformed responses get rejected, and that
//! decision is made during conversion, not during deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Symbol-level failure reported inside a 2xx envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Indicators {
    pub quote: Vec<QuoteIndicator>,
    pub adjclose: Vec<AdjCloseIndicator>,
}

/// Parallel arrays indexed alongside `timestamp`. Yahoo pads holiday and
/// in-progress slots with nulls, so every element is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuoteIndicator {
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdjCloseIndicator {
    pub adjclose: Vec<Option<f64>>,
}
