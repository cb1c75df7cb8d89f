//! Yahoo Finance US/global-market price history adapter.
//!
//! Issues one call per request to the v8 chart endpoint at daily
//! granularity. Quote timestamps are truncated to their UTC calendar day;
//! `adjClose` takes the `adjclose` indicator when Yahoo provides one and
//! falls back to `close` otherwise.

mod models;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::GatewayError;
use crate::models::Bar;
use crate::provider::{body_error, build_client, check_response, HistoryProvider};

use models::{ChartResponse, ChartResult};

const PROVIDER_ID: &str = "YAHOO";
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// US/global-market price provider backed by the Yahoo chart API.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the adapter at an alternate endpoint (stub servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = build_client().map_err(|e| {
            GatewayError::unavailable(PROVIDER_ID, format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Unix timestamps bounding the inclusive `[start, end]` day range.
    /// Yahoo's `period2` is exclusive, so it steps one day past `end`.
    fn period_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end
            .succ_opt()
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        (period1, period2)
    }

    fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
        values.get(index).copied().flatten()
    }

    fn to_decimal(value: f64, field: &str, index: usize) -> Result<Decimal, GatewayError> {
        Decimal::from_f64_retain(value).ok_or_else(|| {
            GatewayError::parse(
                PROVIDER_ID,
                format!("row {index}: {field} value {value} is not a finite number"),
            )
        })
    }

    /// Convert one chart result into bars.
    ///
    /// Indices where every OHLCV value is null are padding Yahoo emits for
    /// holidays and in-progress sessions; they carry no data and are dropped
    /// before conversion. A row with a partial set of prices is genuinely
    /// malformed and fails the whole call.
    fn result_to_bars(result: ChartResult) -> Result<Vec<Bar>, GatewayError> {
        let timestamps = result.timestamp.unwrap_or_default();
        if timestamps.is_empty() {
            return Err(GatewayError::NoData);
        }

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::parse(PROVIDER_ID, "chart result has no quote block"))?;
        let adjclose = result
            .indicators
            .adjclose
            .into_iter()
            .next()
            .map(|block| block.adjclose)
            .unwrap_or_default();

        let mut bars = Vec::with_capacity(timestamps.len());
        for (index, ts) in timestamps.iter().enumerate() {
            let open = Self::value_at(&quote.open, index);
            let high = Self::value_at(&quote.high, index);
            let low = Self::value_at(&quote.low, index);
            let close = Self::value_at(&quote.close, index);
            let volume = quote.volume.get(index).copied().flatten();

            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                return Err(GatewayError::parse(
                    PROVIDER_ID,
                    format!("row {index} has a partial set of price fields"),
                ));
            };

            let date = Utc
                .timestamp_opt(*ts, 0)
                .single()
                .ok_or_else(|| {
                    GatewayError::parse(PROVIDER_ID, format!("row {index}: invalid timestamp {ts}"))
                })?
                .date_naive();

            let close = Self::to_decimal(close, "close", index)?;
            let adj_close = match Self::value_at(&adjclose, index) {
                Some(value) => Self::to_decimal(value, "adjclose", index)?,
                None => close,
            };

            bars.push(Bar {
                date,
                open: Self::to_decimal(open, "open", index)?,
                high: Self::to_decimal(high, "high", index)?,
                low: Self::to_decimal(low, "low", index)?,
                close,
                adj_close,
                // Indices and FX series report no volume; zero is a valid
                // volume for a Bar.
                volume: volume.unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Err(GatewayError::NoData);
        }
        Ok(bars)
    }
}

#[async_trait]
impl HistoryProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_history(
        &self,
        query_key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, GatewayError> {
        let (period1, period2) = Self::period_bounds(start, end);
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&includeAdjustedClose=true",
            self.base_url,
            encode(query_key),
            period1,
            period2,
        );

        debug!(
            "Fetching US history for {} from {} to {} from Yahoo",
            query_key,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::unavailable(PROVIDER_ID, e))?;

        check_response(PROVIDER_ID, &response)?;

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| body_error(PROVIDER_ID, e))?;

        if let Some(error) = body.chart.error {
            let message = error
                .description
                .or(error.code)
                .unwrap_or_else(|| "chart error".to_string());
            warn!("Yahoo chart error for '{}': {}", query_key, message);
            return Err(GatewayError::unavailable(PROVIDER_ID, message));
        }

        let result = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(GatewayError::NoData)?;

        Self::result_to_bars(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::models::{AdjCloseIndicator, Indicators, QuoteIndicator};
    use rust_decimal_macros::dec;

    fn chart_result(
        timestamps: Vec<i64>,
        quote: QuoteIndicator,
        adjclose: Option<Vec<Option<f64>>>,
    ) -> ChartResult {
        ChartResult {
            timestamp: Some(timestamps),
            indicators: Indicators {
                quote: vec![quote],
                adjclose: adjclose
                    .map(|values| vec![AdjCloseIndicator { adjclose: values }])
                    .unwrap_or_default(),
            },
        }
    }

    #[test]
    fn test_timestamps_truncate_to_utc_calendar_day() {
        // 2024-01-02 14:30:00 UTC
        let result = chart_result(
            vec![1704205800],
            QuoteIndicator {
                open: vec![Some(187.15)],
                high: vec![Some(188.44)],
                low: vec![Some(183.89)],
                close: vec![Some(185.64)],
                volume: vec![Some(82_488_700)],
            },
            None,
        );

        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_missing_adjclose_falls_back_to_close() {
        let result = chart_result(
            vec![1704205800],
            QuoteIndicator {
                open: vec![Some(10.0)],
                high: vec![Some(12.0)],
                low: vec![Some(9.0)],
                close: vec![Some(11.0)],
                volume: vec![Some(1000)],
            },
            None,
        );

        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars[0].adj_close, bars[0].close);
    }

    #[test]
    fn test_adjclose_used_when_present() {
        let result = chart_result(
            vec![1704205800],
            QuoteIndicator {
                open: vec![Some(10.0)],
                high: vec![Some(12.0)],
                low: vec![Some(9.0)],
                close: vec![Some(11.0)],
                volume: vec![Some(1000)],
            },
            Some(vec![Some(10.5)]),
        );

        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars[0].adj_close, dec!(10.5));
        assert_eq!(bars[0].close, dec!(11.0));
    }

    #[test]
    fn test_all_null_padding_rows_are_dropped() {
        let result = chart_result(
            vec![1704205800, 1704292200],
            QuoteIndicator {
                open: vec![Some(10.0), None],
                high: vec![Some(12.0), None],
                low: vec![Some(9.0), None],
                close: vec![Some(11.0), None],
                volume: vec![Some(1000), None],
            },
            None,
        );

        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn test_partial_price_row_fails_whole_call() {
        let result = chart_result(
            vec![1704205800],
            QuoteIndicator {
                open: vec![Some(10.0)],
                high: vec![Some(12.0)],
                low: vec![None],
                close: vec![Some(11.0)],
                volume: vec![Some(1000)],
            },
            None,
        );

        let error = YahooProvider::result_to_bars(result).unwrap_err();
        assert!(matches!(error, GatewayError::UpstreamParseError { .. }));
    }

    #[test]
    fn test_missing_volume_defaults_to_zero() {
        let result = chart_result(
            vec![1704205800],
            QuoteIndicator {
                open: vec![Some(1.09)],
                high: vec![Some(1.10)],
                low: vec![Some(1.08)],
                close: vec![Some(1.095)],
                volume: vec![None],
            },
            None,
        );

        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars[0].volume, 0);
    }

    #[test]
    fn test_empty_timestamps_is_no_data() {
        let result = ChartResult {
            timestamp: None,
            indicators: Indicators::default(),
        };
        assert!(matches!(
            YahooProvider::result_to_bars(result),
            Err(GatewayError::NoData)
        ));
    }

    #[test]
    fn test_period_bounds_cover_inclusive_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let (period1, period2) = YahooProvider::period_bounds(start, end);

        assert_eq!(period1, 1704067200); // 2024-01-01T00:00:00Z
        assert_eq!(period2, 1704499200); // 2024-01-06T00:00:00Z
    }

    #[test]
    fn test_lenient_parse_of_drifted_payload() {
        // Extra unknown fields and a missing adjclose block must not fail
        // deserialization.
        let body: ChartResponse = serde_json::from_str(
            r#"{
                "chart": {
                    "result": [{
                        "meta": {"currency": "USD", "somethingNew": 42},
                        "timestamp": [1704205800],
                        "indicators": {
                            "quote": [{
                                "open": [10.0],
                                "high": [12.0],
                                "low": [9.0],
                                "close": [11.0],
                                "volume": [1000]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();

        let result = body.chart.result.unwrap().into_iter().next().unwrap();
        let bars = YahooProvider::result_to_bars(result).unwrap();
        assert_eq!(bars[0].close, dec!(11.0));
    }
}
