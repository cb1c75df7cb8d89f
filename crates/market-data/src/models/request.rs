use chrono::NaiveDate;
use serde::Deserialize;

/// Input to the gateway: a raw symbol plus an inclusive date range.
///
/// The gateway does not validate that `start` precedes `end`; providers
/// report zero rows for an inverted range and that surfaces as an empty
/// series.
#[derive(Clone, Debug, Deserialize)]
pub struct SeriesRequest {
    /// Raw caller-supplied ticker, e.g. `"2330.TW"` or `"aapl"`
    pub symbol: String,
    /// First trading day requested (inclusive)
    pub start: NaiveDate,
    /// Last trading day requested (inclusive)
    pub end: NaiveDate,
}
