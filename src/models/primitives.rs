//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides the broker API generation selector plus small
//! strongly-typed wrappers used throughout the crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A trading symbol in the broker's `EXCHANGE:INSTRUMENT[-SUFFIX]`
/// convention (e.g. `"NSE:SBIN-EQ"`, `"NSE:NIFTY50-INDEX"`).
///
/// Only non-emptiness is validated here; malformed symbols are the
/// broker's rejection to report.
///
/// # Example
///
/// ```
/// use fyers_rs::Symbol;
///
/// let symbol = Symbol::new("NSE:SBIN-EQ").unwrap();
/// assert_eq!(symbol.as_str(), "NSE:SBIN-EQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol. Fails with [`Error::Validation`] if blank.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(Error::Validation("symbol must not be empty".to_string()));
        }
        Ok(Self(s))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Candle interval for historical data requests.
///
/// The broker accepts a fixed set of interval tokens: minute counts
/// (`"1"`, `"5"`, `"15"`, `"60"`) or the daily marker (`"D"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// One-minute candles.
    Min1,
    /// Five-minute candles.
    Min5,
    /// Fifteen-minute candles.
    #[default]
    Min15,
    /// Sixty-minute candles.
    Min60,
    /// Daily candles.
    Day,
}

impl Resolution {
    /// The token the broker expects in the `resolution` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Min1 => "1",
            Resolution::Min5 => "5",
            Resolution::Min15 => "15",
            Resolution::Min60 => "60",
            Resolution::Day => "D",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Resolution::Min1),
            "5" => Ok(Resolution::Min5),
            "15" => Ok(Resolution::Min15),
            "60" => Ok(Resolution::Min60),
            "D" | "d" => Ok(Resolution::Day),
            other => Err(Error::Validation(format!(
                "unknown resolution {other:?}; expected one of 1, 5, 15, 60, D"
            ))),
        }
    }
}

/// Broker API generation selector.
///
/// Two incompatible generations of the Fyers REST API exist in the wild.
/// The generation is chosen once at configuration time and then supplies
/// every generation-dependent detail (paths, token-exchange payload shape,
/// success markers, date formats) uniformly to the authenticator and the
/// session client, so no call site branches on it ad hoc.
///
/// # Example
///
/// ```
/// use fyers_rs::ApiGeneration;
///
/// let generation = ApiGeneration::V3;
/// assert_eq!(generation.token_exchange_path(), "/api/v3/validate-authcode");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiGeneration {
    /// The older v2 API. Sends app id and secret in the clear when
    /// exchanging an auth code.
    V2,
    /// The current v3 API. Requires a SHA-256 credential hash in the
    /// token exchange and flags continuous futures data on history calls.
    #[default]
    V3,
}

impl ApiGeneration {
    /// Default production base URL for REST requests.
    pub fn default_base_url(&self) -> &'static str {
        "https://api.fyers.in"
    }

    /// Path of the authorization-code generation page the user must visit.
    pub fn authcode_path(&self) -> &'static str {
        match self {
            ApiGeneration::V2 => "/api/v2/generate-authcode",
            ApiGeneration::V3 => "/api/v3/generate-authcode",
        }
    }

    /// Path of the code-for-token exchange endpoint.
    pub fn token_exchange_path(&self) -> &'static str {
        match self {
            ApiGeneration::V2 => "/api/v2/token",
            ApiGeneration::V3 => "/api/v3/validate-authcode",
        }
    }

    /// Path of the account profile endpoint.
    pub fn profile_path(&self) -> &'static str {
        match self {
            ApiGeneration::V2 => "/api/v2/profile",
            ApiGeneration::V3 => "/api/v3/profile",
        }
    }

    /// Path of the snapshot quotes endpoint.
    pub fn quotes_path(&self) -> &'static str {
        match self {
            ApiGeneration::V2 => "/data-rest/v2/quotes/",
            ApiGeneration::V3 => "/data-rest/v3/quotes/",
        }
    }

    /// Path of the historical candles endpoint.
    pub fn history_path(&self) -> &'static str {
        match self {
            ApiGeneration::V2 => "/data-rest/v2/history/",
            ApiGeneration::V3 => "/data-rest/v3/history/",
        }
    }

    /// Whether the token exchange wants a credential hash instead of the
    /// raw app id and secret.
    pub fn uses_credential_hash(&self) -> bool {
        matches!(self, ApiGeneration::V3)
    }

    /// Whether history queries carry the `cont_flag=1` parameter.
    pub fn requires_cont_flag(&self) -> bool {
        matches!(self, ApiGeneration::V3)
    }

    /// Format a history range date the way this generation expects it.
    ///
    /// V2 passes the calendar date through as given; V3 strftime-formats
    /// it as `YYYY-MM-DD`. The textual output currently coincides, but the
    /// rule lives here so a format drift in either generation stays local.
    pub fn format_range_date(&self, date: NaiveDate) -> String {
        match self {
            ApiGeneration::V2 => date.to_string(),
            ApiGeneration::V3 => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Check the token-exchange success marker for this generation.
    ///
    /// V2 treats the presence of an `access_token` key as success; V3
    /// additionally requires `s == "ok"`.
    pub fn exchange_succeeded(&self, body: &serde_json::Value) -> bool {
        let has_token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .is_some_and(|t| !t.is_empty());
        match self {
            ApiGeneration::V2 => has_token,
            ApiGeneration::V3 => {
                has_token && body.get("s").and_then(|s| s.as_str()) == Some("ok")
            }
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiGeneration::V2 => write!(f, "v2"),
            ApiGeneration::V3 => write!(f, "v3"),
        }
    }
}

impl FromStr for ApiGeneration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(ApiGeneration::V2),
            "v3" | "3" => Ok(ApiGeneration::V3),
            other => Err(Error::Validation(format!(
                "unknown API generation {other:?}; expected \"v2\" or \"v3\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_non_empty() {
        let symbol = Symbol::new("NSE:SBIN-EQ").unwrap();
        assert_eq!(symbol.as_str(), "NSE:SBIN-EQ");
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("   ").is_err());
    }

    #[test]
    fn test_resolution_tokens() {
        assert_eq!(Resolution::Min15.as_str(), "15");
        assert_eq!(Resolution::Day.as_str(), "D");
        assert_eq!("60".parse::<Resolution>().unwrap(), Resolution::Min60);
        assert!("42".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_generation_paths() {
        assert_eq!(ApiGeneration::V2.token_exchange_path(), "/api/v2/token");
        assert_eq!(
            ApiGeneration::V3.token_exchange_path(),
            "/api/v3/validate-authcode"
        );
        assert_eq!(ApiGeneration::V2.quotes_path(), "/data-rest/v2/quotes/");
        assert!(ApiGeneration::V3.requires_cont_flag());
        assert!(!ApiGeneration::V2.requires_cont_flag());
    }

    #[test]
    fn test_exchange_success_markers() {
        let ok = json!({"s": "ok", "access_token": "T"});
        let no_status = json!({"access_token": "T"});
        let rejected = json!({"s": "error", "message": "invalid auth code"});

        assert!(ApiGeneration::V2.exchange_succeeded(&ok));
        assert!(ApiGeneration::V2.exchange_succeeded(&no_status));
        assert!(!ApiGeneration::V2.exchange_succeeded(&rejected));

        assert!(ApiGeneration::V3.exchange_succeeded(&ok));
        assert!(!ApiGeneration::V3.exchange_succeeded(&no_status));
        assert!(!ApiGeneration::V3.exchange_succeeded(&rejected));
    }

    #[test]
    fn test_range_date_formats() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
        assert_eq!(ApiGeneration::V2.format_range_date(date), "2023-11-14");
        assert_eq!(ApiGeneration::V3.format_range_date(date), "2023-11-14");
    }
}
