//! TwitCasting API v2 endpoints and header values

/// Production API host. Every OAuth and API path is relative to this.
pub const DEFAULT_BASE_URL: &str = "https://apiv2.twitcasting.tv";

/// Consent page the user is redirected to
pub const AUTHORIZE_PATH: &str = "oauth2/authorize";

/// Token endpoint for the authorization-code exchange
pub const ACCESS_TOKEN_PATH: &str = "oauth2/access_token";

/// Sent as `X-Api-Version` on every signed API call
pub const API_VERSION: &str = "2.0";

pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const JSON_CONTENT_TYPE: &str = "application/json";
