//! API service modules for the broker's read-only data endpoints.
//!
//! Each service provides methods for one subset of the Fyers REST API.

mod market_data;
mod profile;

pub use market_data::MarketDataService;
pub use profile::ProfileService;
