//! Error types for the Fyers API client.
//!
//! Every failure a call can produce is represented here. An empty
//! historical result is deliberately NOT an error; see
//! [`HistoryResult::NoData`](crate::models::HistoryResult::NoData).

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Fyers operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Fyers API operations.
///
/// Failures are classified so the interactive layer can tell a transport
/// problem from a broker rejection from a locally-caught mistake. No
/// variant is fatal: every error is scoped to the single call that raised
/// it and leaves an authenticated session usable.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP call itself could not complete (DNS, connection refused,
    /// timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was missing or blank before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// A session-client call was attempted without an access token
    #[error("Not authenticated; complete the authorization flow first")]
    NotAuthenticated,

    /// The token endpoint responded but rejected the exchange
    #[error("Authentication failed: status={status}, body={body}")]
    Authentication {
        /// HTTP status code of the rejection
        status: u16,
        /// Raw response body for display
        body: Value,
    },

    /// A data endpoint responded with a non-success status
    #[error("API error on {endpoint}: status={status}, body={body}")]
    Api {
        /// Endpoint name for diagnostics
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Raw response body for display
        body: Value,
    },

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if the HTTP call never completed.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Authentication { .. } | Error::NotAuthenticated
        )
    }

    /// Returns `true` if the failure was caught locally, before any
    /// request was issued.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotAuthenticated)
    }

    /// The raw broker payload carried by this error, if any.
    pub fn broker_body(&self) -> Option<&Value> {
        match self {
            Error::Authentication { body, .. } | Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_classification() {
        assert!(Error::NotAuthenticated.is_auth_error());
        assert!(Error::Authentication {
            status: 401,
            body: json!({"error": "bad code"}),
        }
        .is_auth_error());
        assert!(Error::Validation("blank secret".into()).is_validation_error());
        assert!(!Error::Validation("blank secret".into()).is_auth_error());
    }

    #[test]
    fn test_broker_body_preserved() {
        let err = Error::Api {
            endpoint: "quotes".into(),
            status: 400,
            body: json!({"s": "error", "message": "invalid symbol"}),
        };
        assert_eq!(
            err.broker_body().and_then(|b| b.get("message")),
            Some(&json!("invalid symbol"))
        );
        assert!(Error::NotAuthenticated.broker_body().is_none());
    }

    #[test]
    fn test_display_includes_status() {
        let err = Error::Authentication {
            status: 403,
            body: json!({"error": "expired code"}),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("expired code"));
    }
}
