//! Access Token - Bearer Credentials for the Felix API
//!
//! The identity provider issues the token; this crate only attaches
//! it. When the token is a JWT its `exp` claim is decoded so callers
//! can warn before sending a request that will be rejected.
//! The raw token is never logged.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Environment variable holding the bearer token.
pub const ACCESS_TOKEN_ENV: &str = "FELIX_ACCESS_TOKEN";

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Bearer token attached to every API request.
#[derive(Clone)]
pub struct AccessToken {
    /// Raw token (never logged).
    token: String,
    /// Expiry from the JWT `exp` claim, if readable.
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Wrap a raw token, decoding its expiry when it is a JWT.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let expires_at = decode_expiry(&token);
        Self { token, expires_at }
    }

    /// Load the token from `FELIX_ACCESS_TOKEN`.
    ///
    /// Returns `None` when the variable is unset or blank; the listing
    /// endpoint may be public.
    pub fn from_env() -> Option<Self> {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }

    /// Raw token for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.token
    }

    /// Expiry decoded from the token, if any.
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the token is known to be expired at `now`.
    ///
    /// Tokens without a readable expiry are never considered expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Whether the token is known to be expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Read `exp` from the payload segment of a JWT.
fn decode_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}
