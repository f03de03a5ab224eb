//! Authentication headers for TwitCasting API calls
//!
//! Every API v2 call carries `Accept: application/json`, `X-Api-Version: 2.0`
//! and an `Authorization` header. Application-level endpoints authenticate
//! with the client credentials (Basic); user-level endpoints with the access
//! token obtained from the exchange (Bearer).

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::constants::{API_VERSION, JSON_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::grant::AuthorizationCodeGrant;
use crate::token::AccessToken;

pub const X_API_VERSION: HeaderName = HeaderName::from_static("x-api-version");

/// Something that can authenticate an outgoing API request.
pub trait RequestSigner {
    /// Value of the `Authorization` header.
    fn authorization(&self) -> Result<HeaderValue>;

    /// Insert the common API headers and `Authorization`, replacing any
    /// values already present.
    fn sign(&self, headers: &mut HeaderMap) -> Result<()> {
        let authorization = self.authorization()?;
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(X_API_VERSION, HeaderValue::from_static(API_VERSION));
        headers.insert(AUTHORIZATION, authorization);
        Ok(())
    }
}

/// App-level calls: `Basic base64(client_id:client_secret)`.
impl RequestSigner for AuthorizationCodeGrant {
    fn authorization(&self) -> Result<HeaderValue> {
        sensitive(self.basic_authorization())
    }
}

/// User-level calls: `Bearer <access_token>`.
impl RequestSigner for AccessToken {
    fn authorization(&self) -> Result<HeaderValue> {
        sensitive(format!("Bearer {}", self.token()))
    }
}

fn sensitive(value: String) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&value)
        .map_err(|e| Error::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
