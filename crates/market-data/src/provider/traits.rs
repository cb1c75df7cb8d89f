//! History provider trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::GatewayError;
use crate::models::Bar;

/// Contract shared by the upstream price-history adapters.
///
/// Implementations perform exactly one outbound call per invocation and map
/// the provider's native row shape onto [`Bar`]s, ordered by date
/// ascending. Zero rows is reported as [`GatewayError::NoData`]; the
/// orchestrator turns that into a successful empty series. There is no
/// per-row recovery: either every row converts cleanly or the whole call
/// fails.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Stable identifier used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch daily bars for `query_key` over the inclusive `[start, end]`
    /// date range.
    async fn fetch_history(
        &self,
        query_key: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, GatewayError>;
}
