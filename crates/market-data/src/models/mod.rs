//! Core data types for the gateway:
//! - `bar` - the canonical normalized daily price record ([`Bar`])
//! - `request` - the caller's input ([`SeriesRequest`])

mod bar;
mod request;

pub use bar::Bar;
pub use request::SeriesRequest;
