//! Authorization code exchange
//!
//! The second leg of the flow: the user approved our application and the
//! provider redirected back with `code`. We POST the code together with the
//! application credentials to the token endpoint and get an access token.
//!
//! The token endpoint wants a form body and HTTP Basic client
//! authentication, unlike the JSON API calls signed by [`crate::signer`].

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::authorize::endpoint;
use crate::constants::{
    ACCESS_TOKEN_PATH, DEFAULT_BASE_URL, FORM_CONTENT_TYPE, GRANT_TYPE_AUTHORIZATION_CODE,
    JSON_CONTENT_TYPE,
};
use crate::error::{Error, Result, error_for_status};
use crate::grant::AuthorizationCodeGrant;
use crate::token::{AccessToken, parse_token_response};
use crate::transport::{HttpTransport, PostRequest, ReqwestTransport};

/// Exchanges authorization codes for access tokens.
///
/// Holds no per-call state, so one client can be shared across tasks.
/// Every call performs exactly one POST and never retries.
#[derive(Clone)]
pub struct TokenExchangeClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl TokenExchangeClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Client over a plain `reqwest::Client`.
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self::new(Arc::new(ReqwestTransport::new(client)))
    }

    /// Point the client at another API host (staging, local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange `code` for an access token using the credentials in `grant`.
    ///
    /// Fails with `Unauthorized` on 401/403, `Status` on any other non-200,
    /// `MalformedResponse` when a 200 body lacks a usable token, and `Http`
    /// when the request never got a response.
    pub async fn exchange_code(
        &self,
        code: &str,
        grant: &AuthorizationCodeGrant,
    ) -> Result<AccessToken> {
        let request = self.build_request(code, grant)?;
        debug!(
            url = %request.url,
            client_id = grant.client_id(),
            "requesting access token"
        );

        let response = self.transport.post(request).await.inspect_err(|e| {
            warn!(error = %e, "token exchange request failed");
        })?;

        if response.status != 200 {
            let err = error_for_status(response.status, response.body);
            warn!(status = response.status, error = %err, "token endpoint rejected exchange");
            return Err(err);
        }

        let token = parse_token_response(&response.body).inspect_err(|e| {
            warn!(error = %e, "unusable token response");
        })?;
        info!(
            client_id = grant.client_id(),
            expires_in = token.expires_in(),
            "access token issued"
        );
        Ok(token)
    }

    fn build_request(&self, code: &str, grant: &AuthorizationCodeGrant) -> Result<PostRequest> {
        let url = endpoint(&self.base_url, ACCESS_TOKEN_PATH)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let mut authorization = HeaderValue::from_str(&grant.basic_authorization())
            .map_err(|e| Error::InvalidHeader(format!("authorization: {e}")))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let form = vec![
            ("code".to_owned(), code.to_owned()),
            (
                "grant_type".to_owned(),
                GRANT_TYPE_AUTHORIZATION_CODE.to_owned(),
            ),
            ("client_id".to_owned(), grant.client_id().to_owned()),
            ("client_secret".to_owned(), grant.client_secret().to_owned()),
            ("redirect_uri".to_owned(), grant.callback_url().to_owned()),
        ];

        Ok(PostRequest { url, headers, form })
    }
}
