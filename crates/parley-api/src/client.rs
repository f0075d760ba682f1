//! HTTP plumbing shared by every endpoint.
//!
//! Each endpoint module adds methods to [`ApiClient`] through its own
//! `impl` block; this module owns the `reqwest::Client`, the bearer-token
//! hook and the status/decode handling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use parley_shared::constants::{
    DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

use crate::error::{ApiError, Result};
use crate::session::Session;

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend root, without the `/api` suffix.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request, including reading the body.
    pub request_timeout: Duration,
    /// Log request and response bodies at `trace` level.
    pub log_bodies: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_bodies: false,
        }
    }
}

/// Typed client for the Parley backend.
///
/// Cheap to clone; clones share the connection pool and the [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    session: Arc<Session>,
    log_bodies: bool,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: Arc<Session>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("parley-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            session,
            log_bodies: config.log_bodies,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request hook: attach the current bearer token, if any.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.http.request(method, self.url(path)))
    }

    fn log_request_body<B: Serialize + ?Sized>(&self, path: &str, body: &B) {
        if self.log_bodies {
            match serde_json::to_string(body) {
                Ok(json) => trace!(path, body = %json, "request body"),
                Err(e) => trace!(path, error = %e, "request body not serializable"),
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, self.request(Method::GET, path))
            .await
    }

    pub(crate) async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, path).query(query);
        self.execute(Method::GET, path, builder).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.log_request_body(path, body);
        let builder = self.request(method.clone(), path).json(body);
        self.execute(method, path, builder).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::POST, path, self.request(Method::POST, path))
            .await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.execute(Method::POST, path, builder).await
    }

    /// Send a request and hand back the unprocessed response, for callers
    /// that want to inspect the status code themselves.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            self.log_request_body(path, body);
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        debug!(%method, path, status = resp.status().as_u16(), "raw API response");
        Ok(resp)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        let started = Instant::now();
        debug!(%method, path, "API request");

        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API response"
        );
        if self.log_bodies {
            trace!(path, body = %String::from_utf8_lossy(&bytes), "response body");
        }

        check_status(status, &bytes)?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

fn check_status(status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = error_message(body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Auth {
            status: status.as_u16(),
            message,
        });
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        }),
    })
}

/// Pull `message` or `error` out of an error body, if it is JSON.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Percent-encode a single path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status(StatusCode::OK, b"").is_ok());

        let err = check_status(StatusCode::UNAUTHORIZED, br#"{"message":"expired"}"#).unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));

        let err = check_status(StatusCode::FORBIDDEN, b"").unwrap_err();
        assert!(err.is_auth());

        match check_status(StatusCode::NOT_FOUND, br#"{"error":"no such chat"}"#).unwrap_err() {
            ApiError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such chat");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match check_status(StatusCode::BAD_GATEWAY, b"<html>").unwrap_err() {
            ApiError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn segments_are_escaped() {
        assert_eq!(segment("abc-123"), "abc-123");
        assert_eq!(segment("👍"), "%F0%9F%91%8D");
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segment("c1?x=1#y"), "c1%3Fx%3D1%23y");
        assert_eq!(segment("hello world"), "hello%20world");
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = ApiClient::new(
            ApiConfig {
                base_url: "http://example.test/".into(),
                ..ApiConfig::default()
            },
            Arc::new(Session::new()),
        )
        .unwrap();
        assert_eq!(client.url("/api/chats"), "http://example.test/api/chats");
    }
}
