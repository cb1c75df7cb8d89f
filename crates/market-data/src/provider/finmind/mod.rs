//! FinMind Taiwan-market price history adapter.
//!
//! Issues one call per request to FinMind's `TaiwanStockPrice` dataset and
//! remaps its row shape onto the canonical [`Bar`]: `high <- max`,
//! `low <- min`, `volume <- Trading_Volume`. FinMind exposes no distinct
//! adjusted close, so `adjClose` mirrors `close`.

mod models;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::errors::GatewayError;
use crate::models::Bar;
use crate::provider::{body_error, build_client, check_response, HistoryProvider};

use models::{FinMindResponse, FinMindRow};

const PROVIDER_ID: &str = "FINMIND";
const DEFAULT_BASE_URL: &str = "https://api.finmindtrade.com";

/// Taiwan-market price provider backed by FinMind.
pub struct FinMindProvider {
    client: reqwest::Client,
    base_url: String,
}

impl FinMindProvider {
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

    fn row_to_bar(row: FinMindRow) -> Bar {
        Bar {
            date: row.date,
            open: row.open,
            high: row.max,
            low: row.min,
            close: row.close,
            adj_close: row.close,
            volume: row.trading_volume,
        }
    }
}

#[async_trait]
impl HistoryProvider for FinMindProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_history(
        &self,
        query_key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, GatewayError> {
        let url = format!(
            "{}/api/v4/data?dataset=TaiwanStockPrice&data_id={}&start_date={}&end_date={}",
            self.base_url,
            urlencoding::encode(query_key),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        debug!("Fetching TW history for {} from FinMind", query_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::unavailable(PROVIDER_ID, e))?;

        check_response(PROVIDER_ID, &response)?;

        let body: FinMindResponse = response
            .json()
            .await
            .map_err(|e| body_error(PROVIDER_ID, e))?;

        if body.data.is_empty() {
            warn!(
                "FinMind returned no rows for '{}' between {} and {}",
                query_key, start, end
            );
            return Err(GatewayError::NoData);
        }

        Ok(body.data.into_iter().map(Self::row_to_bar).collect())
    }
}
