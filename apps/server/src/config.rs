//! Server configuration sourced from the environment.

use std::time::Duration;

/// Runtime configuration for the gateway server.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Minimum interval between outbound calls to a given provider.
    pub min_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("QG_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let min_interval = std::env::var("QG_MIN_INTERVAL_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(1000));
        Self {
            listen_addr,
            min_interval,
        }
    }
}
