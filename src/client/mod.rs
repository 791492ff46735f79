//! HTTP client and service layer for the Fyers API.
//!
//! This module provides the main entry point [`FyersClient`], which holds
//! an authenticated [`Session`](crate::auth::Session) and exposes the
//! read-only data services.
//!
//! # Example
//!
//! ```no_run
//! use fyers_rs::{FyersClient, ClientConfig, Session};
//!
//! # async fn example(session: Session) -> fyers_rs::Result<()> {
//! let client = FyersClient::with_session(session, ClientConfig::default())?;
//! let profile = client.profile().get().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::ClientConfig;
pub use http::FyersClient;
pub(crate) use http::ClientInner;
