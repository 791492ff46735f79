//! HTTP client implementation for the Fyers API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::sync::Arc;

use crate::api::{MarketDataService, ProfileService};
use crate::auth::Session;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for the broker's read-only data endpoints.
///
/// A client can only be built from an existing [`Session`]; there is no
/// unauthenticated construction path. Each data call is independent and
/// stateless beyond the held token: one request, no retries, no caching.
///
/// # Example
///
/// ```no_run
/// use fyers_rs::{FyersClient, ClientConfig, Session, Symbol};
///
/// # async fn example(session: Session) -> fyers_rs::Result<()> {
/// let client = FyersClient::with_session(session, ClientConfig::default())?;
///
/// let profile = client.profile().get().await?;
/// println!("profile: {profile}");
///
/// let symbol = Symbol::new("NSE:NIFTY50-INDEX")?;
/// let quote = client.market_data().quote(&symbol).await?;
/// # Ok(())
/// # }
/// ```
pub struct FyersClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl FyersClient {
    /// Create a client from an authenticated session.
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
            }),
        })
    }

    /// Get the profile service.
    pub fn profile(&self) -> ProfileService {
        ProfileService::new(self.inner.clone())
    }

    /// Get the market data service (quotes and historical candles).
    pub fn market_data(&self) -> MarketDataService {
        MarketDataService::new(self.inner.clone())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Log out by consuming the client and dropping its session token.
    ///
    /// The broker holds no server-side session for this flow, so logout
    /// is purely local; afterwards the user is back in the
    /// unauthenticated state and must re-run the authorization flow.
    pub fn logout(self) {
        tracing::debug!(app_id = self.inner.session.app_id(), "session closed");
        drop(self);
    }
}

impl ClientInner {
    /// Base URL for data requests.
    pub(crate) fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.session.generation().default_base_url())
    }

    /// Build request headers with the broker's authorization convention.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.session.authorization_header())
                .map_err(|_| Error::NotAuthenticated)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Make one GET request and return the parsed body.
    ///
    /// `endpoint` is the human-readable name carried into [`Error::Api`]
    /// for diagnostics. Non-success statuses surface the raw body; the
    /// call is never retried here.
    pub(crate) async fn get(
        &self,
        endpoint: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url(), path);

        tracing::debug!(endpoint, url = %url, "issuing data request");

        let response = self
            .http
            .get(&url)
            .headers(self.build_headers()?)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "data request rejected");
            Err(Error::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Clone for FyersClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for FyersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FyersClient")
            .field("session", &self.inner.session)
            .field("config", &self.inner.config)
            .finish()
    }
}
