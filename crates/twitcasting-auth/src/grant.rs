//! Registered application credentials for the authorization-code flow

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::Secret;

use crate::authorize::build_authorization_url;
use crate::error::Result;

/// Client id, client secret and callback URL of a registered application.
///
/// Supplied by the caller and never mutated. The secret is redacted from
/// `Debug` output.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeGrant {
    client_id: String,
    client_secret: Secret<String>,
    callback_url: String,
}

impl AuthorizationCodeGrant {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            callback_url: callback_url.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.expose()
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// `Basic base64(client_id:client_secret)`
    ///
    /// The pair is joined verbatim; a `:` inside either half is not escaped.
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret.expose());
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Consent page URL for this application on the API host at `base_url`.
    pub fn authorization_url(&self, base_url: &str, state: &str) -> Result<String> {
        build_authorization_url(base_url, self, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_authorization_encodes_pair() {
        let grant = AuthorizationCodeGrant::new("id", "secret", "https://example.com/cb");
        // base64("id:secret")
        assert_eq!(grant.basic_authorization(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn basic_authorization_keeps_colons_and_symbols() {
        let cases = [
            ("client:id", "sec:ret"),
            ("a.b-c_d", "p@ss w/ord+=&?"),
            ("", ""),
            ("~!#$%^*()", "[]{}|\\;'\",<>"),
        ];
        for (id, secret) in cases {
            let grant = AuthorizationCodeGrant::new(id, secret, "https://example.com/cb");
            let header = grant.basic_authorization();
            let encoded = header.strip_prefix("Basic ").expect("Basic prefix");
            let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
            assert_eq!(decoded, format!("{id}:{secret}"));
        }
    }

    #[test]
    fn debug_redacts_secret() {
        let grant = AuthorizationCodeGrant::new("id", "top-secret", "https://example.com/cb");
        let debug = format!("{grant:?}");
        assert!(!debug.contains("top-secret"), "got: {debug}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("https://example.com/cb"));
    }

    #[test]
    fn authorization_url_matches_free_function() {
        let grant = AuthorizationCodeGrant::new("app.1234", "secret", "https://example.com/cb");
        let url = grant
            .authorization_url("https://apiv2.twitcasting.tv", "xyz")
            .unwrap();
        assert_eq!(
            url,
            "https://apiv2.twitcasting.tv/oauth2/authorize?client_id=app.1234&response_type=code&state=xyz"
        );
        assert_eq!(
            url,
            build_authorization_url("https://apiv2.twitcasting.tv", &grant, "xyz").unwrap()
        );
    }

    #[test]
    fn accessors_return_inputs() {
        let grant = AuthorizationCodeGrant::new("id", "secret", "https://example.com/cb");
        assert_eq!(grant.client_id(), "id");
        assert_eq!(grant.client_secret(), "secret");
        assert_eq!(grant.callback_url(), "https://example.com/cb");
    }
}
