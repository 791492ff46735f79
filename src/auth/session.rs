//! In-memory session state produced by a successful code exchange.

use secrecy::{ExposeSecret, SecretString};

use crate::models::ApiGeneration;
use crate::{Error, Result};

/// An authenticated session: the bearer access token plus the application
/// identifier it belongs to.
///
/// A session exists only in process memory for the lifetime of the
/// interactive session; it is never persisted. There is no refresh token:
/// once the broker expires the access token, the user re-runs the full
/// authorization flow.
///
/// # Thread Safety
///
/// `Session` is plain owned state, cheap to clone. A multi-user host
/// embedding this crate must keep one session per user, never a
/// process-global one.
#[derive(Clone)]
pub struct Session {
    app_id: String,
    access_token: SecretString,
    generation: ApiGeneration,
}

impl Session {
    /// Resume a session from a known access token.
    ///
    /// Normally sessions come out of
    /// [`Authenticator::exchange_code`](crate::auth::Authenticator::exchange_code);
    /// this constructor exists for callers that already hold a live token.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] if the token is blank
    /// - [`Error::Validation`] if the app id is blank
    pub fn new(
        app_id: impl Into<String>,
        access_token: impl Into<String>,
        generation: ApiGeneration,
    ) -> Result<Self> {
        let app_id = app_id.into();
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(Error::NotAuthenticated);
        }
        if app_id.trim().is_empty() {
            return Err(Error::Validation("app id must not be empty".to_string()));
        }
        Ok(Self {
            app_id,
            access_token: SecretString::from(access_token),
            generation,
        })
    }

    /// The application identifier this session belongs to.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The API generation the session was established against.
    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    /// Format the broker's `Authorization` header value.
    ///
    /// The convention is exactly `{app_id}:{access_token}`, identical in
    /// both API generations.
    pub fn authorization_header(&self) -> String {
        format!("{}:{}", self.app_id, self.access_token.expose_secret())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("app_id", &self.app_id)
            .field("access_token", &"[REDACTED]")
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_format() {
        let session = Session::new("APP-100", "TOKEN", ApiGeneration::V2).unwrap();
        assert_eq!(session.authorization_header(), "APP-100:TOKEN");
    }

    #[test]
    fn test_blank_token_rejected() {
        let err = Session::new("APP-100", "", ApiGeneration::V3).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        let err = Session::new("APP-100", "   ", ApiGeneration::V3).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }

    #[test]
    fn test_blank_app_id_rejected() {
        let err = Session::new("", "TOKEN", ApiGeneration::V3).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("APP-100", "super-secret-token", ApiGeneration::V3).unwrap();
        let debug_str = format!("{session:?}");
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }
}
