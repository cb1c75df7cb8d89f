//! Gateway orchestration: classify, pace, fetch, normalize.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::{classify, ProviderKind};
use crate::errors::GatewayError;
use crate::governor::RequestGovernor;
use crate::models::{Bar, SeriesRequest};
use crate::provider::HistoryProvider;

/// Composes the classifier, the request governor, and the two provider
/// adapters into the gateway's single public operation.
///
/// The orchestrator is stateless across calls: no request affects the
/// outcome of another except through the shared governor's pacing.
pub struct HistoryGateway {
    governor: RequestGovernor,
    tw: Arc<dyn HistoryProvider>,
    us: Arc<dyn HistoryProvider>,
}

impl HistoryGateway {
    pub fn new(
        governor: RequestGovernor,
        tw: Arc<dyn HistoryProvider>,
        us: Arc<dyn HistoryProvider>,
    ) -> Self {
        Self { governor, tw, us }
    }

    /// Fetch a normalized daily history for the requested symbol.
    ///
    /// Classifies the symbol, acquires a governed slot for the selected
    /// provider, and invokes that provider's adapter. `NoData` from the
    /// adapter becomes a successful empty series; every other adapter
    /// failure propagates unchanged. There is no cross-provider fallback: a
    /// TW classification never falls back to the US provider, and vice
    /// versa.
    pub async fn get_history(&self, request: &SeriesRequest) -> Result<Vec<Bar>, GatewayError> {
        let selection = classify(&request.symbol)?;
        let provider = match selection.provider {
            ProviderKind::Tw => &self.tw,
            ProviderKind::Us => &self.us,
        };

        debug!(
            "history request for '{}' routed to {} as '{}'",
            request.symbol,
            provider.id(),
            selection.query_key
        );

        let _permit = self.governor.acquire(selection.provider).await;
        match provider
            .fetch_history(&selection.query_key, request.start, request.end)
            .await
        {
            Ok(bars) => Ok(bars),
            Err(GatewayError::NoData) => Ok(Vec::new()),
            Err(error) => Err(error),
        }
    }
}
