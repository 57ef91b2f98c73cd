//! Tower integration for the header gate.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{Request, Response},
};
use futures_util::future::{ready, Either, Ready};
use tower::{Layer, Service};

use crate::config::GateConfig;
use crate::gate::{CompilationError, Gate};

/// Layer that puts a header gate in front of a service.
#[derive(Clone, Debug)]
pub struct BlockHeaderLayer {
    gate: Arc<Gate>,
}

impl BlockHeaderLayer {
    pub fn new(gate: Gate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }

    /// Compile the configured rules; any invalid pattern means no layer.
    pub fn from_config(config: &GateConfig) -> Result<Self, CompilationError> {
        Gate::from_config(config).map(Self::new)
    }
}

impl<S> Layer<S> for BlockHeaderLayer {
    type Service = BlockHeader<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BlockHeader::new(inner, self.gate.clone())
    }
}

/// Service that answers 403 for requests matching a rule and forwards the rest.
#[derive(Clone, Debug)]
pub struct BlockHeader<S> {
    inner: S,
    gate: Arc<Gate>,
}

impl<S> BlockHeader<S> {
    pub fn new(inner: S, gate: Arc<Gate>) -> Self {
        Self { inner, gate }
    }
}

impl<S, B> Service<Request<B>> for BlockHeader<S>
where
    S: Service<Request<B>, Response = Response<Body>>,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response<Body>, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        if let Some(rule) = self.gate.first_match(req.headers()) {
            tracing::debug!(
                gate = %self.gate.name(),
                header = %rule.name(),
                pattern = %rule.pattern(),
                path = %req.uri().path(),
                "Request blocked by header rule"
            );
            return Either::Left(ready(Ok(Gate::forbidden_response(req.headers()))));
        }

        Either::Right(self.inner.call(req))
    }
}
