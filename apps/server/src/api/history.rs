use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use quotegate_market_data::{Bar, GatewayError, SeriesRequest};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Query parameters are extracted as plain optionals so a missing or
/// malformed value produces the structured JSON error body rather than an
/// extractor rejection.
#[derive(serde::Deserialize)]
pub(crate) struct HistoryQuery {
    symbol: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// `GET /history?symbol=..&start=..&end=..` - normalized daily OHLCV bars.
///
/// The extractor result is taken as a `Result` so a query string the
/// deserializer cannot handle (repeated keys, undecodable values) still
/// yields the structured JSON error body instead of axum's plain-text
/// rejection.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Bar>>> {
    let Query(q) = query.map_err(|_| ApiError::BadQuery("query string"))?;
    let symbol = q.symbol.unwrap_or_default();
    if symbol.trim().is_empty() {
        return Err(GatewayError::InvalidSymbol(symbol).into());
    }
    let start = parse_date(q.start.as_deref(), "start")?;
    let end = parse_date(q.end.as_deref(), "end")?;

    let request = SeriesRequest { symbol, start, end };
    let bars = state.gateway.get_history(&request).await?;
    Ok(Json(bars))
}

fn parse_date(value: Option<&str>, name: &'static str) -> Result<NaiveDate, ApiError> {
    value
        .and_then(|v| v.parse::<NaiveDate>().ok())
        .ok_or(ApiError::BadQuery(name))
}
