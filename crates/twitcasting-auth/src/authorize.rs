//! Authorization URL construction
//!
//! The first leg of the flow: the user is sent to the provider's consent
//! page with our client id and an opaque `state`. The provider redirects back
//! to the registered callback URL with `code` and the same `state`, and the
//! code is then exchanged by [`crate::TokenExchangeClient`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;
use reqwest::Url;

use crate::constants::AUTHORIZE_PATH;
use crate::error::{Error, Result};
use crate::grant::AuthorizationCodeGrant;

/// Generate a random `state` value for CSRF protection.
///
/// 32 random bytes as URL-safe base64 without padding (43 characters).
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the consent page URL for `grant`.
pub fn build_authorization_url(
    base_url: &str,
    grant: &AuthorizationCodeGrant,
    state: &str,
) -> Result<String> {
    let mut url = endpoint(base_url, AUTHORIZE_PATH)?;
    url.query_pairs_mut()
        .append_pair("client_id", grant.client_id())
        .append_pair("response_type", "code")
        .append_pair("state", state);
    Ok(url.to_string())
}

/// Join an API path onto the base URL, tolerating a trailing slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| Error::InvalidUrl(format!("{joined}: {e}")))
}
