//! Quotegate Market Data Crate
//!
//! Normalized daily OHLCV price history for a ticker, regardless of which
//! exchange it trades on. Two structurally different upstream providers - a
//! Taiwan-market source (FinMind) and a US/global source (Yahoo Finance) -
//! sit behind one canonical response shape.
//!
//! # Architecture
//!
//! ```text
//! +----------------+     +--------------------+
//! |  SeriesRequest | --> | Symbol Classifier  |  (provider + query key)
//! +----------------+     +--------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         | Request Governor  |  (FIFO, paced, per provider)
//!                         +-------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         | HistoryProvider   |  (FinMind or Yahoo)
//!                         +-------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         |     Vec<Bar>      |  (normalized OHLCV)
//!                         +-------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Bar`] - one normalized daily OHLCV price record
//! - [`SeriesRequest`] - raw symbol plus inclusive date range
//! - [`ProviderSelection`] - routing decision derived from the symbol
//! - [`HistoryGateway`] - the orchestrator; its [`HistoryGateway::get_history`]
//!   is the crate's single public operation
//! - [`GatewayError`] - the unified error taxonomy

pub mod classifier;
pub mod errors;
pub mod gateway;
pub mod governor;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{Bar, SeriesRequest};

// Re-export classifier types
pub use classifier::{classify, ProviderKind, ProviderSelection};

// Re-export governor types
pub use governor::{GovernorConfig, RequestGovernor, SlotPermit};

// Re-export gateway and provider types
pub use errors::GatewayError;
pub use gateway::HistoryGateway;
pub use provider::{FinMindProvider, HistoryProvider, YahooProvider};
