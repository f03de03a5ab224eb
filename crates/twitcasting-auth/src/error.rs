//! Error types for OAuth operations

use serde::Deserialize;

/// Errors from token exchange, URL building and request signing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport never produced a status (connect failure, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// 401/403 from the provider. The response body is not inspected.
    #[error("unauthorized: token endpoint returned {status}")]
    Unauthorized { status: u16 },

    /// Any other non-200 status
    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 200 with a body that is not a usable token response. Display never
    /// includes `body`: it can hold a live token.
    #[error("malformed token response: {reason}")]
    MalformedResponse { reason: String, body: String },

    #[error("invalid access token: {0}")]
    InvalidAccessToken(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error envelope returned by the TwitCasting API on failed calls:
/// `{"error":{"code":1000,"message":"Invalid token"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

impl Error {
    /// HTTP status carried by the error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { status } | Error::Status { status, .. } => Some(*status),
            Error::MalformedResponse { .. } => Some(200),
            _ => None,
        }
    }

    /// Provider error details parsed from a `Status` body.
    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            Error::Status { body, .. } => serde_json::from_str::<ApiErrorEnvelope>(body)
                .ok()
                .map(|envelope| envelope.error),
            _ => None,
        }
    }
}

/// Map a non-200 status to its failure kind.
///
/// 401 and 403 mean the client credentials or the code were rejected; the
/// body is dropped. Everything else keeps the body for diagnostics.
pub fn error_for_status(status: u16, body: String) -> Error {
    match status {
        401 | 403 => Error::Unauthorized { status },
        _ => Error::Status { status, body },
    }
}

/// Build a `MalformedResponse` from a reason and the raw body.
pub(crate) fn malformed(reason: impl Into<String>, body: &str) -> Error {
    Error::MalformedResponse {
        reason: reason.into(),
        body: body.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_is_unauthorized() {
        assert!(matches!(
            error_for_status(401, "ignored".into()),
            Error::Unauthorized { status: 401 }
        ));
    }

    #[test]
    fn status_403_is_unauthorized() {
        assert!(matches!(
            error_for_status(403, String::new()),
            Error::Unauthorized { status: 403 }
        ));
    }

    #[test]
    fn other_statuses_keep_code_and_body() {
        for status in [201, 204, 400, 404, 429, 500, 503] {
            match error_for_status(status, "boom".into()) {
                Error::Status { status: s, body } => {
                    assert_eq!(s, status);
                    assert_eq!(body, "boom");
                }
                other => panic!("status {status} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn status_accessor() {
        assert_eq!(Error::Unauthorized { status: 401 }.status(), Some(401));
        assert_eq!(error_for_status(500, String::new()).status(), Some(500));
        assert_eq!(malformed("empty body", "").status(), Some(200));
        assert_eq!(Error::Http("connection refused".into()).status(), None);
    }

    #[test]
    fn api_error_parses_provider_envelope() {
        let err = error_for_status(
            400,
            r#"{"error":{"code":400,"message":"Bad Request","details":{}}}"#.into(),
        );
        assert_eq!(
            err.api_error(),
            Some(ApiError {
                code: 400,
                message: "Bad Request".into(),
            })
        );
    }

    #[test]
    fn api_error_absent_for_plain_body() {
        assert!(error_for_status(502, "bad gateway".into()).api_error().is_none());
        assert!(Error::Unauthorized { status: 401 }.api_error().is_none());
    }

    #[test]
    fn malformed_display_omits_body() {
        let body = r#"{"access_token":"live-token","expires_in":0}"#;
        let err = malformed("expires_in must be positive", body);
        let msg = err.to_string();
        assert_eq!(msg, "malformed token response: expires_in must be positive");
        assert!(!msg.contains("live-token"), "got: {msg}");
        match err {
            Error::MalformedResponse { body: raw, .. } => assert_eq!(raw, body),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
