//! Tower layer guarding routes with an [`AccessGate`].
//!
//! The layer reads the role token from a request header, asks the gate, and
//! either forwards the untouched request to the inner service or answers
//! `403 Forbidden` without calling it.
//!
//! # Example
//!
//! ```ignore
//! let registry = Arc::new(Registry::new([author])?);
//!
//! Router::new()
//!     .route("/articles", post(create_article))
//!     .route_layer(registry.guard_layer("article", AccessLevel::Modify));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{HeaderName, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use pin_project_lite::pin_project;
use rolegate::{AccessGate, AccessLevel, Decision, Registry, Resource};
use tower::{Layer, Service};

use crate::config::{ConfigError, GateConfig};

/// Route layer that enforces a minimum access level on one resource.
#[derive(Debug, Clone)]
pub struct GuardLayer {
    gate: AccessGate,
    header: HeaderName,
    deny_body: String,
}

impl GuardLayer {
    /// Guard with the default `Authorized-Role` header.
    pub fn new(gate: AccessGate) -> Self {
        Self {
            gate,
            header: HeaderName::from_static("authorized-role"),
            deny_body: GateConfig::default().deny_body,
        }
    }

    /// Guard using the header and deny body from `config`.
    pub fn with_config(gate: AccessGate, config: &GateConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            gate,
            header: config.header_name()?,
            deny_body: config.deny_body.clone(),
        })
    }

    /// The gate making decisions for this layer.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardService {
            inner,
            gate: self.gate.clone(),
            header: self.header.clone(),
            deny_body: self.deny_body.clone(),
        }
    }
}

/// Service wrapper for [`GuardLayer`].
#[derive(Debug, Clone)]
pub struct GuardService<S> {
    inner: S,
    gate: AccessGate,
    header: HeaderName,
    deny_body: String,
}

impl<S, B> Service<Request<B>> for GuardService<S>
where
    S: Service<Request<B>, Response = Response>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = GuardFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        // Non UTF-8 header values count as a missing token.
        let token = req
            .headers()
            .get(&self.header)
            .and_then(|value| value.to_str().ok());

        // The gate logs the decision; the span adds the request context.
        let decision = tracing::info_span!(
            "guard",
            method = %req.method(),
            path = %req.uri().path()
        )
        .in_scope(|| self.gate.decide(token));

        match decision {
            Decision::Allow => GuardFuture::Inner {
                fut: self.inner.call(req),
            },
            Decision::Deny(_) => GuardFuture::Denied {
                resp: Some(forbidden_response(&self.deny_body)),
            },
        }
    }
}

pin_project! {
    /// Future for [`GuardService`].
    #[project = GuardFutureProj]
    pub enum GuardFuture<F> {
        Inner { #[pin] fut: F },
        Denied { resp: Option<Response> },
    }
}

impl<F, E> Future for GuardFuture<F>
where
    F: Future<Output = Result<Response, E>>,
{
    type Output = Result<Response, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            GuardFutureProj::Inner { fut } => fut.poll(cx),
            GuardFutureProj::Denied { resp } => Poll::Ready(Ok(resp
                .take()
                .unwrap_or_else(|| StatusCode::FORBIDDEN.into_response()))),
        }
    }
}

fn forbidden_response(body: &str) -> Response {
    (StatusCode::FORBIDDEN, body.to_string()).into_response()
}

/// Builds guard layers straight from a shared registry.
pub trait RegistryExt {
    /// Guard `resource` at a minimum of `minimal`, reading the default header.
    fn guard_layer<R: Resource + ?Sized>(&self, resource: &R, minimal: AccessLevel) -> GuardLayer;
}

impl RegistryExt for Arc<Registry> {
    fn guard_layer<R: Resource + ?Sized>(&self, resource: &R, minimal: AccessLevel) -> GuardLayer {
        GuardLayer::new(Arc::clone(self).guard(resource, minimal))
    }
}
