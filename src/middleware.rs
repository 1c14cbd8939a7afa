//! Request middleware: decorators that run between the client and the
//! transport.
//!
//! A middleware receives the outgoing [`Request`] plus a [`Next`] handle and
//! decides how to continue: usually by adjusting the request and calling
//! `next.run(request)`. Errors and cancellation propagate through `run`
//! unchanged; no middleware in this crate retries, caches, or translates
//! errors.
//!
//! Header semantics are last-writer-wins: the client installs
//! [`BearerAuth`] as the first chain entry, so later middleware can observe
//! (or deliberately override) the `authorization` header.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::Error;
use crate::transport::{Request, Response, Transport, TransportError};

/// A single entry in the request-processing chain.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Process `request`, delegating to `next` to continue the chain.
    async fn handle(
        &self,
        request: Request,
        next: Next<'_>,
    ) -> Result<Response, TransportError>;
}

/// The remainder of the chain: zero or more middleware entries followed by
/// the transport.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    chain: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, chain: &'a [Arc<dyn Middleware>]) -> Self {
        Self { transport, chain }
    }

    /// Run `request` through the remaining middleware and the transport.
    pub fn run(self, request: Request) -> BoxFuture<'a, Result<Response, TransportError>> {
        match self.chain.split_first() {
            Some((current, rest)) => current.handle(
                request,
                Next {
                    transport: self.transport,
                    chain: rest,
                },
            ),
            None => self.transport.send(request),
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.chain.len())
            .finish()
    }
}

/// Middleware that sets `authorization: Bearer <api key>` on every outgoing
/// request.
///
/// The header value is fixed at construction; the middleware holds no
/// mutable state and is safe to share across in-flight requests. It touches
/// no other part of the request and passes the response through untouched.
pub struct BearerAuth {
    value: HeaderValue,
}

impl BearerAuth {
    /// Build the middleware for `api_key`.
    ///
    /// Fails if the key contains bytes that are not permitted in an HTTP
    /// header value.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            Error::InvalidValue("API key contains characters not permitted in a header".into())
        })?;
        value.set_sensitive(true);
        Ok(Self { value })
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    async fn handle(
        &self,
        mut request: Request,
        next: Next<'_>,
    ) -> Result<Response, TransportError> {
        request.headers.insert(AUTHORIZATION, self.value.clone());
        next.run(request).await
    }
}

// The credential must never show up in logs or debug output.
impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").field("value", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{StatusCode, Url};
    use std::sync::Mutex;

    /// Transport double that records every request it receives.
    struct Recorder {
        seen: Mutex<Vec<Request>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: Request) -> Result<Response, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response {
                status: StatusCode::OK,
                headers: reqwest::header::HeaderMap::new(),
                body: b"[]".to_vec(),
            })
        }
    }

    /// Middleware that tags requests with a marker header, for order checks.
    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(
            &self,
            mut request: Request,
            next: Next<'_>,
        ) -> Result<Response, TransportError> {
            request
                .headers
                .append("x-tag", HeaderValue::from_static(self.0));
            next.run(request).await
        }
    }

    fn tip_request() -> Request {
        Request::get(Url::parse("https://api.koios.rest/api/v1/tip").unwrap())
    }

    #[tokio::test]
    async fn bearer_auth_sets_exactly_one_authorization_header() {
        let transport = Recorder::new();
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(BearerAuth::new("abc").unwrap()), Arc::new(Tag("t"))];

        Next::new(&transport, &chain).run(tip_request()).await.unwrap();

        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        let auth: Vec<_> = seen[0].headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(auth, vec!["Bearer abc"]);
        // The tag middleware ran after auth and its header survived.
        assert_eq!(seen[0].headers.get("x-tag").unwrap(), "t");
    }

    #[tokio::test]
    async fn chain_runs_in_declaration_order() {
        let transport = Recorder::new();
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Tag("first")), Arc::new(Tag("second"))];

        Next::new(&transport, &chain).run(tip_request()).await.unwrap();

        let seen = transport.requests();
        let tags: Vec<_> = seen[0].headers.get_all("x-tag").iter().collect();
        assert_eq!(tags, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn empty_chain_reaches_the_transport_untouched() {
        let transport = Recorder::new();
        let chain: Vec<Arc<dyn Middleware>> = Vec::new();

        Next::new(&transport, &chain).run(tip_request()).await.unwrap();

        let seen = transport.requests();
        assert!(seen[0].headers.is_empty());
    }

    #[test]
    fn debug_output_redacts_the_credential() {
        let auth = BearerAuth::new("super-secret").unwrap();
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn control_characters_in_the_key_are_rejected() {
        assert!(matches!(
            BearerAuth::new("bad\nkey"),
            Err(Error::InvalidValue(_))
        ));
    }
}
