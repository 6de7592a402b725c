//! OAuth access tokens for the document store.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::store::StoreError;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-account/default/token";

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
pub struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Debug)]
pub enum TokenSource {
    /// Emulators accept unauthenticated requests.
    Anonymous,
    /// Service-account token from the instance metadata server.
    Metadata(Mutex<Option<CachedToken>>),
}

impl TokenSource {
    pub fn metadata() -> Self {
        Self::Metadata(Mutex::new(None))
    }

    pub async fn bearer(&self, client: &reqwest::Client) -> Result<Option<String>, StoreError> {
        let Self::Metadata(cache) = self else {
            return Ok(None);
        };

        let mut cached = cache.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(Some(token.value.clone()));
            }
        }

        debug!("fetching access token from metadata server");
        let response = client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;
        if !response.status().is_success() {
            return Err(StoreError::Auth(format!(
                "metadata server returned {}",
                response.status()
            )));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(Some(token.access_token))
    }
}
