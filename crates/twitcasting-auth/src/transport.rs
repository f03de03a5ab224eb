//! HTTP transport seam
//!
//! The exchange logic only needs "POST a form with these headers, give me
//! the status and body back". `HttpTransport` is that capability and nothing
//! more, so the client can run against a fake in tests and against any HTTP
//! stack in production. `ReqwestTransport` is the default.
//!
//! Non-2xx statuses are returned as ordinary responses; only failures that
//! never produced a status become `Error::Http`.

use std::future::Future;
use std::pin::Pin;

use reqwest::Url;
use reqwest::header::HeaderMap;

use crate::error::{Error, Result};

/// Outbound form POST.
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub url: Url,
    pub headers: HeaderMap,
    /// Form fields, encoded as `application/x-www-form-urlencoded` in order
    pub form: Vec<(String, String)>,
}

/// Status and raw body of the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal HTTP capability used by the token exchange.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn HttpTransport>`).
pub trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        request: PostRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PostResponse>> + Send + 'a>>;
}

/// `HttpTransport` backed by a `reqwest::Client`.
///
/// Timeouts, proxies and TLS settings are whatever the wrapped client was
/// built with.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        request: PostRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PostResponse>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .post(request.url)
                .headers(request.headers)
                .form(&request.form)
                .send()
                .await
                .map_err(|e| Error::Http(format!("request failed: {e}")))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| Error::Http(format!("reading response body: {e}")))?;

            Ok(PostResponse { status, body })
        })
    }
}

/// Scripted transport that records every request it receives.
#[cfg(test)]
pub(crate) struct FakeTransport {
    reply: std::sync::Mutex<Option<Result<PostResponse>>>,
    pub(crate) requests: std::sync::Mutex<Vec<PostRequest>>,
}

#[cfg(test)]
impl FakeTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self::with_result(Ok(PostResponse {
            status,
            body: body.to_owned(),
        }))
    }

    pub(crate) fn with_result(reply: Result<PostResponse>) -> Self {
        Self {
            reply: std::sync::Mutex::new(Some(reply)),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn recorded(&self) -> Vec<PostRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl HttpTransport for FakeTransport {
    fn post<'a>(
        &'a self,
        request: PostRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PostResponse>> + Send + 'a>> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .reply
            .lock()
            .unwrap()
            .take()
            .expect("FakeTransport called more than once");
        Box::pin(async move { reply })
    }
}
