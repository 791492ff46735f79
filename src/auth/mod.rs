//! Authentication for the Fyers API: the authorization-code flow and the
//! resulting in-memory session.
//!
//! The flow is a once-per-session, three-step handshake:
//!
//! 1. Build an authorization URL with [`Authenticator::authorization_url`]
//!    and have the user visit it out-of-band.
//! 2. Paste the broker's redirect back in and pull the one-time code out
//!    with [`Authenticator::extract_authorization_code`].
//! 3. Exchange the code with [`Authenticator::exchange_code`], which
//!    yields a [`Session`] holding the bearer access token.
//!
//! The session then backs every [`FyersClient`](crate::FyersClient) call.
//! There is no refresh state: an expired token means re-running the flow.
//!
//! ```no_run
//! use fyers_rs::{ApplicationCredential, Authenticator, ApiGeneration};
//!
//! # async fn example() -> fyers_rs::Result<()> {
//! let credential = ApplicationCredential::new("APP-100", "app-secret")?;
//! let auth = Authenticator::new(credential, "https://127.0.0.1:8000/", ApiGeneration::V3)?;
//! let code = Authenticator::extract_authorization_code("?auth_code=abc&state=sample");
//! let session = auth.exchange_code(&code).await?;
//! # Ok(())
//! # }
//! ```

mod authenticator;
mod session;

pub use authenticator::{ApplicationCredential, Authenticator};
pub use session::Session;
