//! Profile service for the authenticated account.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::Result;

/// Service for the account profile endpoint.
///
/// The profile schema belongs to the broker; the payload is returned
/// verbatim for the caller to display.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: fyers_rs::FyersClient) -> fyers_rs::Result<()> {
/// let profile = client.profile().get().await?;
/// println!("{profile:#}");
/// # Ok(())
/// # }
/// ```
pub struct ProfileService {
    inner: Arc<ClientInner>,
}

impl ProfileService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Fetch the account profile.
    pub async fn get(&self) -> Result<serde_json::Value> {
        let path = self.inner.session.generation().profile_path();
        self.inner.get("profile", path, &[]).await
    }
}
