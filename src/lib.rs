//! # fyers-rs
//!
//! A Rust client for the Fyers brokerage market-data and trading REST API.
//!
//! This crate walks an application through the broker's authorization-code
//! exchange, holds the resulting bearer token for the session, and issues
//! read-only REST calls: account profile, live quotes, and historical
//! candles.
//!
//! ## Features
//!
//! - **Authentication**: authorization-code exchange with the v2 and v3
//!   token endpoints, including the v3 credential hash
//! - **Two API generations**: endpoint paths, payload shapes, and response
//!   markers selected once via [`ApiGeneration`], used uniformly
//! - **Market Data**: snapshot quotes and OHLCV candle history reshaped
//!   into chronological series
//! - **Type Safety**: strongly-typed symbols, resolutions, and candle
//!   models with decimal prices
//! - **Async-first**: built on `reqwest` for non-blocking I/O
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fyers_rs::{
//!     ApiGeneration, ApplicationCredential, Authenticator, ClientConfig,
//!     FyersClient, Symbol,
//! };
//!
//! #[tokio::main]
//! async fn main() -> fyers_rs::Result<()> {
//!     let credential = ApplicationCredential::new("YOUR-APP-ID", "your-secret")?;
//!     let auth = Authenticator::new(
//!         credential,
//!         "https://127.0.0.1:8000/",
//!         ApiGeneration::V3,
//!     )?;
//!
//!     // 1. Have the user visit the login URL out-of-band.
//!     println!("Visit: {}", auth.authorization_url());
//!
//!     // 2. Paste the redirect (or the bare code) back in.
//!     let pasted = "https://127.0.0.1:8000/?auth_code=abc123&state=sample";
//!     let code = Authenticator::extract_authorization_code(pasted);
//!
//!     // 3. Exchange the one-time code for a session token.
//!     let session = auth.exchange_code(&code).await?;
//!
//!     let client = FyersClient::with_session(session, ClientConfig::default())?;
//!
//!     let symbol = Symbol::new("NSE:NIFTY50-INDEX")?;
//!     let quote = client.market_data().quote(&symbol).await?;
//!     if let Some(q) = quote.quote {
//!         println!("last price: {:?}", q.last_price);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Historical Candles
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use fyers_rs::{HistoryResult, Resolution, Symbol};
//!
//! # async fn example(client: fyers_rs::FyersClient) -> fyers_rs::Result<()> {
//! let symbol = Symbol::new("NSE:SBIN-EQ")?;
//! let from = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
//! let to = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
//!
//! match client
//!     .market_data()
//!     .history(&symbol, Resolution::Day, from, to)
//!     .await?
//! {
//!     HistoryResult::Series(series) => {
//!         for candle in &series.candles {
//!             println!("{:?}: close {}", candle.stamp, candle.close);
//!         }
//!     }
//!     HistoryResult::NoData(raw) => {
//!         // Legitimately empty: unsubscribed symbol or non-trading range.
//!         println!("no data: {raw}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{ApplicationCredential, Authenticator, Session};
pub use client::{ClientConfig, FyersClient};
pub use error::{Error, Result};
pub use models::{
    ApiGeneration, Candle, CandleSeries, CandleStamp, HistoryResult, Quote, QuoteResponse,
    Resolution, Symbol,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use fyers_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{MarketDataService, ProfileService};
    pub use crate::auth::{ApplicationCredential, Authenticator, Session};
    pub use crate::client::{ClientConfig, FyersClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        ApiGeneration, Candle, CandleSeries, CandleStamp, HistoryResult, Quote, QuoteResponse,
        Resolution, Symbol,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_base_urls() {
        assert_eq!(ApiGeneration::V2.default_base_url(), "https://api.fyers.in");
        assert_eq!(ApiGeneration::V3.default_base_url(), "https://api.fyers.in");
    }

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("NSE:NIFTY50-INDEX").unwrap();
        assert_eq!(symbol.as_str(), "NSE:NIFTY50-INDEX");
    }

    #[test]
    fn test_generation_parsing() {
        assert_eq!("v2".parse::<ApiGeneration>().unwrap(), ApiGeneration::V2);
        assert_eq!("V3".parse::<ApiGeneration>().unwrap(), ApiGeneration::V3);
        assert!("v4".parse::<ApiGeneration>().is_err());
    }
}
