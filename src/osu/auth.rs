use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::info;

use crate::osu::OsuError;

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: u64,
    client_secret: &'a str,
    grant_type: &'a str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Bearer token for the osu! API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// Lazily fetched client credentials token.
///
/// The token is requested on first use and then reused for the lifetime of
/// the cache. Expiry is not tracked and a rejected token is not refreshed.
/// Concurrent first uses may each request a token, the last one stored wins.
pub struct TokenCache {
    client_id: u64,
    client_secret: String,
    token: RwLock<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(client_id: u64, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            token: RwLock::new(None),
        }
    }

    /// Return the held token, performing the OAuth exchange against
    /// `token_url` if none is held yet.
    pub async fn get_or_refresh(
        &self,
        http_client: &Client,
        token_url: &str,
    ) -> Result<AccessToken, OsuError> {
        let cached = self.token.read().await.clone();
        if let Some(token) = cached {
            return Ok(token);
        }

        let token = self.request_token(http_client, token_url).await?;
        *self.token.write().await = Some(token.clone());
        info!("✅ osu! access token acquired");

        Ok(token)
    }

    async fn request_token(
        &self,
        http_client: &Client,
        token_url: &str,
    ) -> Result<AccessToken, OsuError> {
        let body = TokenRequest {
            client_id: self.client_id,
            client_secret: &self.client_secret,
            grant_type: "client_credentials",
            scope: "public",
        };

        let response = http_client
            .post(token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OsuError::TokenAcquisition(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OsuError::TokenAcquisition(format!("{status}: {message}")));
        }

        let parsed = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| OsuError::TokenAcquisition(e.to_string()))?;

        Ok(AccessToken(parsed.access_token))
    }
}
