//! Authentication support for the Sendpulse client
//!
//! OAuth2 client credentials flow with a cached bearer token. The token is
//! refreshed lazily: callers check expiry on each use, there is no background
//! timer. Concurrent callers that find the token stale share one refresh.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock as SyncRwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::response::ApiOutcome;
use crate::transport::{HttpMethod, HttpRequest, Transport};

/// Refresh this long before the server-side expiry
const EXPIRY_MARGIN_MS: i64 = 1000;

/// Client id and secret
#[derive(Clone, Default)]
pub struct Credentials {
    pub id: Option<String>,
    pub secret: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A bearer token and the instant it stops being used
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token response from the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    /// Seconds, as a number or a numeric string
    #[serde(default)]
    expires_in: Option<Value>,
}

impl TokenResponse {
    fn expires_in_secs(&self) -> f64 {
        match &self.expires_in {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Token request for client credentials grant
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Cached token plus the outcome of the last refresh
#[derive(Debug, Default)]
struct TokenState {
    token: Option<Token>,
    last_failure: Option<Error>,
}

/// Owns the single bearer token of a client
#[derive(Debug)]
pub struct TokenManager {
    token_url: String,
    transport: Arc<dyn Transport>,
    credentials: SyncRwLock<Credentials>,
    state: RwLock<TokenState>,
    /// Completed refresh attempts, bumped under the `state` write lock
    refreshes: AtomicU64,
}

impl TokenManager {
    pub fn new(token_url: String, credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            token_url,
            transport,
            credentials: SyncRwLock::new(credentials),
            state: RwLock::new(TokenState::default()),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Get a valid token, refreshing if necessary.
    ///
    /// Callers that queue behind a refresh share its outcome: they get the
    /// new token, or a copy of the error if it failed.
    pub async fn ensure_token(&self) -> Result<Token> {
        let seen = self.refreshes.load(Ordering::Acquire);

        {
            let state = self.state.read().await;
            if let Some(token) = state.token.as_ref().filter(|t| t.is_valid()) {
                debug!("Using cached access token");
                return Ok(token.clone());
            }
        }

        // Holding the write lock across the fetch makes this the only refresh
        // in flight; everyone else queues on the lock.
        let mut state = self.state.write().await;

        // Double-check in case another task refreshed while we waited
        if let Some(token) = state.token.as_ref().filter(|t| t.is_valid()) {
            debug!("Access token refreshed by a concurrent caller");
            return Ok(token.clone());
        }
        if self.refreshes.load(Ordering::Acquire) != seen {
            if let Some(err) = &state.last_failure {
                debug!("Concurrent token refresh failed");
                return Err(err.for_waiter());
            }
        }

        let outcome = self.fetch_token().await;
        self.refreshes.fetch_add(1, Ordering::Release);

        match outcome {
            Ok(token) => {
                state.token = Some(token.clone());
                state.last_failure = None;
                Ok(token)
            }
            Err(err) => {
                state.last_failure = Some(err.for_waiter());
                Err(err)
            }
        }
    }

    /// Fetch a new token from the token endpoint
    async fn fetch_token(&self) -> Result<Token> {
        let credentials = self.credentials.read().clone();
        let id = credentials
            .id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Configuration("id is not defined".to_string()))?;
        let secret = credentials
            .secret
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Configuration("secret is not defined".to_string()))?;

        let body = serde_json::to_string(&TokenRequest {
            grant_type: "client_credentials",
            client_id: &id,
            client_secret: &secret,
        })?;

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.token_url.clone(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        };

        info!(client_id = %id, "Requesting access token");
        let response = self.transport.send(request).await?;

        let body = match ApiOutcome::classify(response.body) {
            ApiOutcome::Success(body) => body,
            ApiOutcome::Failure { code, message } => {
                return Err(Error::Auth(format!("{}: {}", code, message)));
            }
        };

        if !body.is_object() {
            return Err(Error::Auth("Invalid auth response".to_string()));
        }
        let parsed: TokenResponse = serde_json::from_value(body)
            .map_err(|_| Error::Auth("Invalid auth response".to_string()))?;

        // `as` saturates, and maps NaN to 0
        let lifetime_ms =
            ((parsed.expires_in_secs() * 1000.0) as i64).saturating_sub(EXPIRY_MARGIN_MS);
        let value = parsed
            .access_token
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Auth("Invalid auth response".to_string()))?;
        let expires_at = Duration::try_milliseconds(lifetime_ms)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let token = Token {
            value,
            token_type: parsed.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at,
        };
        info!(expires_at = %token.expires_at, "Access token refreshed");

        Ok(token)
    }

    /// Cached token, if any, without touching the network
    pub async fn current(&self) -> Option<Token> {
        self.state.read().await.token.clone()
    }

    /// Invalidate the cached token (force refresh on next request)
    pub async fn invalidate(&self) {
        self.state.write().await.token = None;
    }

    /// Mark the cached token as expired. The next call refreshes it.
    pub async fn expire_now(&self) {
        let mut state = self.state.write().await;
        if let Some(token) = state.token.take() {
            state.token = Some(Token {
                expires_at: Utc::now() - Duration::seconds(1),
                ..token
            });
        }
    }

    /// Replace the credentials used by the next refresh
    pub fn set_credentials(&self, credentials: Credentials) {
        *self.credentials.write() = credentials;
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }
}
