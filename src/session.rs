//! Authenticated session against the remote store
//!
//! A [`Session`] owns the OAuth token material for one run lifetime and hands
//! out bearer tokens on demand, refreshing against the token endpoint when the
//! cached access token has expired. Refresh is an explicit, internally
//! synchronized operation; there is no global credential state.
//!
//! The interactive browser login flow is out of scope: the embedding
//! application obtains the initial token material and passes it in as
//! [`Credentials`].

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::config::HttpConfig;
use crate::error::{Error, Result};

/// Safety margin subtracted from token lifetimes so a token is refreshed
/// before it actually expires mid-request
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Token material supplied by the embedding application
///
/// At least one of `access_token` and `refresh_token` must be present;
/// [`Session::new`] rejects credentials with neither.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Current access token, if one is already held
    pub access_token: Option<String>,
    /// Refresh token for renewing expired access tokens
    pub refresh_token: Option<String>,
    /// Expiry of `access_token`, if known; `None` means "assume valid"
    pub expires_at: Option<DateTime<Utc>>,
}

/// Mutable token state, guarded by the session's mutex
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Authenticated session with explicit refresh-on-expiry
pub struct Session {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: Option<String>,
    state: tokio::sync::Mutex<TokenState>,
}

/// OAuth token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl Session {
    /// Create a session from token material
    ///
    /// Fails with [`Error::Setup`] when neither an access token nor a refresh
    /// token is present, since no authenticated call could ever succeed.
    pub fn new(credentials: Credentials, http_config: &HttpConfig) -> Result<Self> {
        if credentials.access_token.is_none() && credentials.refresh_token.is_none() {
            return Err(Error::setup(
                "credentials reference missing: neither an access token nor a refresh token was provided",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(http_config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            token_url: http_config.token_url.clone(),
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            refresh_token: credentials.refresh_token,
            state: tokio::sync::Mutex::new(TokenState {
                access_token: credentials.access_token,
                expires_at: credentials.expires_at,
            }),
        })
    }

    /// Return a bearer token usable right now, refreshing first if the cached
    /// one has expired (or is missing)
    pub async fn bearer_token(&self) -> Result<String> {
        let mut state = self.state.lock().await;

        if let Some(token) = &state.access_token {
            if !is_expired(state.expires_at) {
                return Ok(token.clone());
            }
            tracing::debug!("access token expired, refreshing");
        }

        self.refresh_locked(&mut state).await
    }

    /// Exchange the refresh token for a new access token
    async fn refresh_locked(&self, state: &mut TokenState) -> Result<String> {
        let refresh_token = self.refresh_token.as_deref().ok_or_else(|| {
            Error::Auth("access token expired and no refresh token is available".to_string())
        })?;

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth(format!(
                "token refresh rejected (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        tracing::info!(expires_in = token.expires_in, "access token refreshed");

        state.access_token = Some(token.access_token.clone());
        state.expires_at = Some(Utc::now() + TimeDelta::seconds(token.expires_in));

        Ok(token.access_token)
    }
}

/// Whether a token with the given expiry should be considered stale
fn is_expired(expires_at: Option<DateTime<Utc>>) -> bool {
    match expires_at {
        Some(at) => Utc::now() + TimeDelta::seconds(EXPIRY_MARGIN_SECS) >= at,
        None => false,
    }
}
