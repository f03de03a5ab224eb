//! TwitCasting OAuth client library
//!
//! Implements the authorization-code flow against the TwitCasting API v2.
//! Holds no token state of its own; storing and reusing tokens is up to the
//! caller.
//!
//! Flow:
//! 1. Caller builds a consent URL with `authorize::build_authorization_url()`
//!    and a fresh `authorize::generate_state()`
//! 2. User approves; the provider redirects to the callback with `code`
//! 3. `TokenExchangeClient::exchange_code()` trades the code for an `AccessToken`
//! 4. API calls are signed with `RequestSigner::sign()` using either the
//!    grant (app-level) or the token (user-level)

pub mod authorize;
pub mod constants;
pub mod error;
pub mod exchange;
pub mod grant;
pub mod signer;
pub mod token;
pub mod transport;

pub use authorize::{build_authorization_url, generate_state};
pub use constants::*;
pub use error::{ApiError, Error, Result, error_for_status};
pub use exchange::TokenExchangeClient;
pub use grant::AuthorizationCodeGrant;
pub use signer::RequestSigner;
pub use token::AccessToken;
pub use transport::{HttpTransport, PostRequest, PostResponse, ReqwestTransport};
