use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::adapters::shared::{join_url, snippet};
use crate::config::types::UpstreamConfig;
use crate::error::{ResolverError, Result};

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 1799;

/// Ceiling applied to the advertised `expires_in`.
const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// OAuth2 client-credentials token source for the upstream provider.
///
/// The cache slot is an async mutex held across the exchange, so concurrent
/// callers that find the token stale wait for the in-flight refresh and then
/// reuse its result. At most one token request is ever in flight.
pub struct TokenProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    timeout: Duration,
    expiry_skew: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        timeout: Duration,
        expiry_skew: Duration,
    ) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            timeout,
            expiry_skew,
            cached: Mutex::new(None),
        }
    }

    pub fn from_config(http: Client, config: &UpstreamConfig) -> Self {
        Self::new(
            http,
            join_url(&config.base_url, &config.token_path),
            config.client_id.clone(),
            config.client_secret.clone(),
            Duration::from_secs(config.token_timeout_secs),
            Duration::from_secs(config.token_expiry_skew_secs),
        )
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Return the cached bearer token, exchanging credentials for a new one
    /// when it is missing or expired. Never retries.
    pub async fn get_token(&self) -> Result<String> {
        let mut slot = self.cached.lock().await;
        if let Some(ref token) = *slot
            && Instant::now() < token.expires_at
        {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }

    /// Forget the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn exchange(&self) -> Result<CachedToken> {
        if !self.has_credentials() {
            return Err(ResolverError::Auth {
                reason: "client credentials are not configured".into(),
            });
        }

        debug!(url = %self.token_url, "Requesting upstream access token");
        let response = self
            .http
            .post(&self.token_url)
            .timeout(self.timeout)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ResolverError::Auth {
                reason: format!("token request failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ResolverError::Auth {
            reason: format!("token response unreadable: {e}"),
        })?;
        if !status.is_success() {
            return Err(ResolverError::Auth {
                reason: format!("token endpoint returned HTTP {status}: {}", snippet(&body)),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| ResolverError::Auth {
            reason: format!("token response malformed: {e}"),
        })?;
        if token.access_token.trim().is_empty() {
            return Err(ResolverError::Auth {
                reason: "token endpoint returned an empty access_token".into(),
            });
        }
        if let Some(ref kind) = token.token_type
            && !kind.eq_ignore_ascii_case("bearer")
        {
            debug!(token_type = %kind, "Unexpected token type, using it as bearer anyway");
        }

        let lifetime = Duration::from_secs(
            token
                .expires_in
                .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
                .min(MAX_TOKEN_LIFETIME_SECS),
        );
        let skew = self.expiry_skew.min(lifetime / 2);
        info!(
            expires_in_secs = lifetime.as_secs(),
            "Obtained upstream access token"
        );

        let now = Instant::now();
        Ok(CachedToken {
            value: token.access_token,
            expires_at: now.checked_add(lifetime - skew).unwrap_or(now),
        })
    }
}
