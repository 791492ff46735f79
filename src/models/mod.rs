//! Data models for the Fyers API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Core types like `Symbol`, `Resolution`, and the
//!   [`primitives::ApiGeneration`] selector
//! - [`market_data`] - Snapshot quote and historical candle models

pub mod market_data;
pub mod primitives;

// Re-export commonly used types
pub use market_data::*;
pub use primitives::*;
