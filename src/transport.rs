//! The seam between the client and the network.
//!
//! [`Transport`] has exactly one job: take a [`Request`], return a
//! [`Response`], asynchronously and fallibly. [`ReqwestTransport`] is the
//! production implementation; tests substitute their own implementation to
//! return canned responses without network access.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};

/// An outgoing HTTP request, as seen by middleware and the transport.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved request URL, including any query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// A GET request with no body.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A POST request carrying a JSON body.
    pub fn post(url: Url, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            method: Method::POST,
            url,
            headers,
            body: Some(body),
        }
    }
}

/// An HTTP response as returned by a [`Transport`].
#[derive(Clone, Debug)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Transport-level failure (timeout, DNS, connection reset, ...).
///
/// The client core never catches or translates these; they surface to the
/// caller exactly as the transport produced them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failure reported by the underlying HTTP stack.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure produced by a non-reqwest transport (test doubles mostly).
    #[error("transport error: {0}")]
    Other(String),
}

/// Sends a request, receives a response.
///
/// Implementations must be safe to call concurrently; the client issues
/// every operation through one shared instance.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the exchange. This is the only suspension point in the
    /// dispatch pipeline.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// Production transport backed by [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing [`reqwest::Client`] (to reuse its pool or TLS
    /// configuration).
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_requests_carry_a_json_content_type() {
        let url = Url::parse("https://api.koios.rest/api/v1/block_info").unwrap();
        let request = Request::post(url, b"{}".to_vec());
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.body.as_deref(), Some(b"{}".as_slice()));
    }

    #[test]
    fn get_requests_start_with_no_headers() {
        let url = Url::parse("https://api.koios.rest/api/v1/tip").unwrap();
        let request = Request::get(url);
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }
}
