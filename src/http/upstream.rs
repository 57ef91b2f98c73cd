//! Forwarding of passed requests to the configured upstream.
//!
//! # Responsibilities
//! - Rewrite the request URI to point at the upstream
//! - Stream the request and response bodies through unchanged
//! - Map upstream connection failures to 502 Bad Gateway

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Shared handle to the upstream.
#[derive(Clone)]
pub struct Upstream {
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl Upstream {
    /// Create a forwarder for `address` (host[:port]).
    pub fn new(address: &str) -> Result<Self, axum::http::uri::InvalidUri> {
        let authority = Authority::from_str(address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { authority, client })
    }

    /// Point `uri` at the upstream, keeping path and query.
    pub fn rewrite_uri(&self, uri: &Uri) -> Uri {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }
}

/// Terminal handler: forwards whatever the gate let through.
pub async fn forward_handler(State(upstream): State<Upstream>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    parts.uri = upstream.rewrite_uri(&parts.uri);

    tracing::debug!(
        method = %parts.method,
        path = %path,
        upstream = %upstream.authority,
        "Forwarding request"
    );

    match upstream.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(upstream = %upstream.authority, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
