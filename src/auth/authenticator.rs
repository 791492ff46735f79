//! Authorization-code exchange against the broker's token endpoint.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use url::Url;

use crate::models::ApiGeneration;
use crate::{Error, Result};

use super::session::Session;

/// Fixed anti-replay state marker embedded in the authorization URL.
///
/// The broker echoes it back on the redirect but no server-side state
/// validation is performed on return, so a constant suffices.
const AUTH_STATE: &str = "sample";

/// Broker-assigned application credentials.
///
/// Supplied once by the operator, held only in process memory, and never
/// logged; `Debug` redacts the secret.
#[derive(Clone)]
pub struct ApplicationCredential {
    app_id: String,
    secret: SecretString,
}

impl ApplicationCredential {
    /// Create a credential pair.
    ///
    /// Fails with [`Error::Validation`] if either field is blank, before
    /// any network activity.
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let secret = secret.into();
        if app_id.trim().is_empty() {
            return Err(Error::Validation("app id must not be empty".to_string()));
        }
        if secret.trim().is_empty() {
            return Err(Error::Validation(
                "secret key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            app_id,
            secret: SecretString::from(secret),
        })
    }

    /// The broker-assigned application identifier.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl std::fmt::Debug for ApplicationCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationCredential")
            .field("app_id", &self.app_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Walks the authorization-code flow: builds the login URL the user must
/// visit out-of-band, extracts the code from the redirect, and exchanges
/// it for a [`Session`] bearing the access token.
///
/// # Example
///
/// ```no_run
/// use fyers_rs::{ApplicationCredential, Authenticator, ApiGeneration};
///
/// # async fn example() -> fyers_rs::Result<()> {
/// let credential = ApplicationCredential::new("APP-100", "secret")?;
/// let auth = Authenticator::new(credential, "https://127.0.0.1:8000/", ApiGeneration::V3)?;
///
/// println!("Visit: {}", auth.authorization_url());
///
/// let code = Authenticator::extract_authorization_code(
///     "https://127.0.0.1:8000/?auth_code=abc123&state=sample",
/// );
/// let session = auth.exchange_code(&code).await?;
/// # Ok(())
/// # }
/// ```
pub struct Authenticator {
    credential: ApplicationCredential,
    redirect_uri: String,
    generation: ApiGeneration,
    base_url: String,
    http: reqwest::Client,
}

impl Authenticator {
    /// Create an authenticator.
    ///
    /// The redirect URI must exactly match the one registered with the
    /// broker; it is validated for well-formedness here, blank fields are
    /// rejected before any request is made.
    pub fn new(
        credential: ApplicationCredential,
        redirect_uri: impl Into<String>,
        generation: ApiGeneration,
    ) -> Result<Self> {
        let redirect_uri = redirect_uri.into();
        if redirect_uri.trim().is_empty() {
            return Err(Error::Validation(
                "redirect URI must not be empty".to_string(),
            ));
        }
        Url::parse(&redirect_uri)?;

        Ok(Self {
            credential,
            redirect_uri,
            generation,
            base_url: generation.default_base_url().to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Override the broker base URL (tests, alternate deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the authorization URL the user must visit to obtain a
    /// one-time auth code.
    ///
    /// Pure and deterministic: identical inputs always produce the
    /// byte-identical URL, with the app id and redirect URI embedded
    /// verbatim the way the broker's login page expects them.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}{}?client_id={}&redirect_uri={}&response_type=code&state={}",
            self.base_url,
            self.generation.authcode_path(),
            self.credential.app_id,
            self.redirect_uri,
            AUTH_STATE,
        )
    }

    /// Extract the authorization code from noisy user input.
    ///
    /// Accepts a bare code or a full redirect URL. Three-tier fallback,
    /// first matching rule wins:
    ///
    /// 1. a `code=` delimiter (which also matches `auth_code=`): take the
    ///    substring up to the next `&` or end of input;
    /// 2. a trailing `&state=` delimiter: take everything before it;
    /// 3. otherwise the trimmed input is the code.
    ///
    /// A code that itself contains `code=` is ambiguous under these
    /// rules; the rule order is a compatibility contract and is kept
    /// as-is.
    pub fn extract_authorization_code(raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some(idx) = trimmed.find("code=") {
            let rest = &trimmed[idx + "code=".len()..];
            match rest.find('&') {
                Some(amp) => rest[..amp].to_string(),
                None => rest.to_string(),
            }
        } else if let Some(idx) = trimmed.find("&state=") {
            trimmed[..idx].to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Compute the credential hash the v3 token endpoint requires.
    ///
    /// SHA-256 over the UTF-8 bytes of `{app_id}:{secret}`, rendered as a
    /// lowercase hex digest. Recomputed on every exchange attempt, never
    /// cached across credential edits.
    pub fn credential_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.credential.app_id.as_bytes());
        hasher.update(b":");
        hasher.update(self.credential.secret.expose_secret().as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Exchange a one-time auth code for a [`Session`].
    ///
    /// One POST to the generation's token endpoint, no retries. Succeeds
    /// only if the HTTP layer reports success AND the generation's success
    /// marker holds on the parsed body.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] if the call never completed (transport failure)
    /// - [`Error::Authentication`] if the broker rejected the exchange,
    ///   carrying the raw payload and status for display
    pub async fn exchange_code(&self, code: &str) -> Result<Session> {
        if code.trim().is_empty() {
            return Err(Error::Validation("auth code must not be empty".to_string()));
        }

        let endpoint = format!("{}{}", self.base_url, self.generation.token_exchange_path());
        let payload = self.token_request_body(code);

        tracing::debug!(
            generation = %self.generation,
            endpoint = %endpoint,
            "exchanging authorization code"
        );

        let response = self.http.post(&endpoint).json(&payload).send().await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();

        if !status.is_success() || !self.generation.exchange_succeeded(&body) {
            tracing::warn!(status = status.as_u16(), "token exchange rejected");
            return Err(Error::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        // exchange_succeeded guarantees the key is a non-empty string
        let access_token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .unwrap_or_default();

        Session::new(self.credential.app_id.clone(), access_token, self.generation)
    }

    fn token_request_body(&self, code: &str) -> serde_json::Value {
        if self.generation.uses_credential_hash() {
            serde_json::json!({
                "grant_type": "authorization_code",
                "appIdHash": self.credential_hash(),
                "code": code,
            })
        } else {
            serde_json::json!({
                "grant_type": "authorization_code",
                "client_id": self.credential.app_id,
                "secret_key": self.credential.secret.expose_secret(),
                "redirect_uri": self.redirect_uri,
                "code": code,
            })
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credential", &self.credential)
            .field("redirect_uri", &self.redirect_uri)
            .field("generation", &self.generation)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator(generation: ApiGeneration) -> Authenticator {
        let credential = ApplicationCredential::new("APPID", "secret").unwrap();
        Authenticator::new(credential, "https://host/cb", generation).unwrap()
    }

    #[test]
    fn test_credential_validation() {
        assert!(ApplicationCredential::new("", "secret").is_err());
        assert!(ApplicationCredential::new("APPID", "").is_err());
        assert!(ApplicationCredential::new("APPID", "secret").is_ok());
    }

    #[test]
    fn test_blank_redirect_uri_rejected() {
        let credential = ApplicationCredential::new("APPID", "secret").unwrap();
        let err = Authenticator::new(credential, "  ", ApiGeneration::V3).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_authorization_url_stable_and_verbatim() {
        let auth = authenticator(ApiGeneration::V2);
        let first = auth.authorization_url();
        let second = auth.authorization_url();
        assert_eq!(first, second);
        assert!(first.contains("client_id=APPID"));
        assert!(first.contains("redirect_uri=https://host/cb"));
        assert!(first.contains("response_type=code"));
        assert!(first.contains("state=sample"));
        assert!(first.starts_with("https://api.fyers.in/api/v2/generate-authcode?"));
    }

    #[test]
    fn test_authorization_url_v3_path() {
        let auth = authenticator(ApiGeneration::V3);
        assert!(auth
            .authorization_url()
            .starts_with("https://api.fyers.in/api/v3/generate-authcode?"));
    }

    #[test]
    fn test_extract_code_round_trips() {
        for input in [
            "https://host/callback?code=abc123&state=sample",
            "https://host/callback?auth_code=abc123&state=sample",
            "abc123",
        ] {
            assert_eq!(Authenticator::extract_authorization_code(input), "abc123");
        }
    }

    #[test]
    fn test_extract_code_tiers() {
        // tier 1: code= up to end of input
        assert_eq!(
            Authenticator::extract_authorization_code("?auth_code=xyz"),
            "xyz"
        );
        // tier 2: trailing &state= with no code= delimiter
        assert_eq!(
            Authenticator::extract_authorization_code("xyz&state=sample"),
            "xyz"
        );
        // tier 3: whitespace-trimmed passthrough
        assert_eq!(Authenticator::extract_authorization_code("  xyz \n"), "xyz");
    }

    #[test]
    fn test_credential_hash_deterministic() {
        let auth = authenticator(ApiGeneration::V3);
        let first = auth.credential_hash();
        let second = auth.credential_hash();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_credential_hash_input_sensitive() {
        let base = authenticator(ApiGeneration::V3).credential_hash();

        let other_id = Authenticator::new(
            ApplicationCredential::new("APPID2", "secret").unwrap(),
            "https://host/cb",
            ApiGeneration::V3,
        )
        .unwrap()
        .credential_hash();
        assert_ne!(base, other_id);

        let other_secret = Authenticator::new(
            ApplicationCredential::new("APPID", "secret2").unwrap(),
            "https://host/cb",
            ApiGeneration::V3,
        )
        .unwrap()
        .credential_hash();
        assert_ne!(base, other_secret);
        assert_ne!(other_id, other_secret);
    }

    #[test]
    fn test_known_hash_vector() {
        // sha256("APPID:secret")
        let auth = authenticator(ApiGeneration::V3);
        assert_eq!(
            auth.credential_hash(),
            {
                let mut hasher = Sha256::new();
                hasher.update(b"APPID:secret");
                hasher
                    .finalize()
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<String>()
            }
        );
    }

    #[test]
    fn test_token_body_shapes() {
        let v2 = authenticator(ApiGeneration::V2).token_request_body("CODE");
        assert_eq!(v2["grant_type"], "authorization_code");
        assert_eq!(v2["client_id"], "APPID");
        assert_eq!(v2["secret_key"], "secret");
        assert_eq!(v2["redirect_uri"], "https://host/cb");
        assert_eq!(v2["code"], "CODE");
        assert!(v2.get("appIdHash").is_none());

        let v3 = authenticator(ApiGeneration::V3).token_request_body("CODE");
        assert_eq!(v3["grant_type"], "authorization_code");
        assert_eq!(v3["code"], "CODE");
        assert!(v3.get("appIdHash").is_some());
        assert!(v3.get("secret_key").is_none());
        assert!(v3.get("redirect_uri").is_none());
    }
}
