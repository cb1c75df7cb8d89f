use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized daily OHLCV price record.
///
/// Every provider response is mapped onto this shape before it leaves the
/// gateway. Within a series, dates are unique and strictly ascending.
/// Providers are trusted to satisfy `low <= open, close <= high`; the
/// gateway does not repair violations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Trading day (ISO `YYYY-MM-DD` on the wire)
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Adjusted close. Equals `close` when the provider exposes no distinct
    /// adjusted value; that fallback is a normalization rule, not a
    /// data-quality signal.
    pub adj_close: Decimal,
    /// Shares/units traded. May be zero, never negative.
    pub volume: u64,
}
