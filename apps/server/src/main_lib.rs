//! Application state and startup wiring.

use std::sync::Arc;

use quotegate_market_data::{
    FinMindProvider, GovernorConfig, HistoryGateway, HistoryProvider, RequestGovernor,
    YahooProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub gateway: HistoryGateway,
}

pub fn init_tracing() {
    let log_format = std::env::var("QG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let governor = RequestGovernor::new(GovernorConfig {
        min_interval: config.min_interval,
    });
    let tw: Arc<dyn HistoryProvider> = Arc::new(FinMindProvider::new()?);
    let us: Arc<dyn HistoryProvider> = Arc::new(YahooProvider::new()?);
    let gateway = HistoryGateway::new(governor, tw, us);
    Ok(Arc::new(AppState { gateway }))
}
