//! Wire models for the FinMind `TaiwanStockPrice` dataset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level FinMind response envelope. The `data` array is absent on some
/// error replies, so it defaults to empty.
#[derive(Debug, Deserialize)]
pub struct FinMindResponse {
    #[serde(default)]
    pub data: Vec<FinMindRow>,
}

/// One daily price row, named after FinMind's wire format: the high/low
/// columns are called `max`/`min` and volume is `Trading_Volume`.
#[derive(Debug, Deserialize)]
pub struct FinMindRow {
    pub date: NaiveDate,
    pub open: Decimal,
    pub max: Decimal,
    pub min: Decimal,
    pub close: Decimal,
    #[serde(rename = "Trading_Volume")]
    pub trading_volume: u64,
}
