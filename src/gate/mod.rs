//! Header gate subsystem.
//!
//! # Data Flow
//! ```text
//! Gate construction (at startup):
//!     GateConfig.rules[]
//!     → rules.rs (compile every pattern, abort on first error)
//!     → Gate (immutable, shared via Arc)
//!
//! Per request:
//!     BlockHeader service (layer.rs)
//!     → Gate::first_match (rules in declaration order, stop at first hit)
//!     → hit:  403, HTML page only if Accept contains "text/html"
//!     → miss: inner service, response returned untouched
//! ```
//!
//! # Design Decisions
//! - Invalid configuration fails at construction, never at request time
//! - Rules are never reloaded; build a new gate instead
//! - No locking: the rule list is read-only after construction

pub mod layer;
pub mod page;
pub mod rules;

use axum::{
    body::Body,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, HeaderValue, Response, StatusCode,
    },
};

use crate::config::GateConfig;

pub use layer::{BlockHeader, BlockHeaderLayer};
pub use page::FORBIDDEN_PAGE;
pub use rules::{compile, CompilationError, CompiledRule, HeaderMatcher};

/// Compiled header rules for one gate instance.
#[derive(Debug)]
pub struct Gate {
    name: String,
    rules: Vec<CompiledRule>,
}

impl Gate {
    /// Create a gate from already compiled rules.
    pub fn new(name: impl Into<String>, rules: Vec<CompiledRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Compile the configured rules into a gate.
    pub fn from_config(config: &GateConfig) -> Result<Self, CompilationError> {
        let rules = compile(&config.rules)?;

        tracing::info!(
            gate = %config.name,
            rules = rules.len(),
            "Header gate compiled"
        );

        Ok(Self::new(config.name.clone(), rules))
    }

    /// Instance name, used to label log events.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// The rule responsible for blocking these headers, if any.
    pub fn first_match(&self, headers: &HeaderMap) -> Option<&CompiledRule> {
        rules::first_match(&self.rules, headers)
    }

    /// Build the 403 returned for a blocked request.
    pub fn forbidden_response(headers: &HeaderMap) -> Response<Body> {
        let wants_html = headers.get(ACCEPT).is_some_and(|accept| {
            accept
                .as_bytes()
                .windows(b"text/html".len())
                .any(|w| w == b"text/html")
        });

        let mut response = if wants_html {
            let mut response = Response::new(Body::from(FORBIDDEN_PAGE));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
            response
        } else {
            Response::new(Body::empty())
        };

        *response.status_mut() = StatusCode::FORBIDDEN;
        response
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(GateConfig::default().name, Vec::new())
    }
}
