//! Access token value and token endpoint response parsing
//!
//! The token endpoint answers a successful exchange with
//! `{"access_token": "...", "expires_in": 15552000}`. Anything else in the
//! object is ignored. `expires_in` is a delta in seconds from issuance.

use std::time::Duration;

use common::Secret;
use serde::Deserialize;

use crate::error::{Error, Result, malformed};

/// Bearer credential returned by a successful exchange.
///
/// Always holds a non-empty token and a positive lifetime.
#[derive(Debug, Clone)]
pub struct AccessToken {
    token: Secret<String>,
    expires_in: u64,
}

impl AccessToken {
    /// Rebuild a token from its parts, e.g. after loading it from storage.
    pub fn new(token: impl Into<String>, expires_in: u64) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::InvalidAccessToken("token is empty".into()));
        }
        if expires_in == 0 {
            return Err(Error::InvalidAccessToken("expires_in must be positive".into()));
        }
        Ok(Self {
            token: Secret::new(token),
            expires_in,
        })
    }

    pub fn token(&self) -> &str {
        self.token.expose()
    }

    /// Seconds the token stays valid after issuance
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }
}

/// Raw token endpoint payload. Both fields optional so a missing field is
/// reported by name instead of as a serde error.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Turn a 200 response body into an `AccessToken`.
pub(crate) fn parse_token_response(body: &str) -> Result<AccessToken> {
    if body.trim().is_empty() {
        return Err(malformed("response body is empty", body));
    }

    let response: TokenResponse = serde_json::from_str(body)
        .map_err(|e| malformed(format!("failed to parse response body: {e}"), body))?;

    let access_token = match response.access_token {
        Some(token) if !token.is_empty() => token,
        _ => return Err(malformed("missing access_token", body)),
    };
    let expires_in = match response.expires_in {
        Some(0) => return Err(malformed("expires_in must be positive", body)),
        Some(secs) => secs,
        None => return Err(malformed("missing expires_in", body)),
    };

    AccessToken::new(access_token, expires_in)
}
