//! Client configuration options.

use std::time::Duration;

/// Configuration for the Fyers client.
///
/// There is deliberately no retry or backoff knob: every data call is a
/// single attempt per user action, and the interactive layer decides
/// whether the user retries.
///
/// # Example
///
/// ```
/// use fyers_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Base URL override; defaults to the generation's production host
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("fyers-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the broker base URL (tests, alternate deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.base_url.is_none());
        assert!(config.user_agent.starts_with("fyers-rs/"));
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_base_url("http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
    }
}
