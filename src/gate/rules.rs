//! Header rule compilation and matching.
//!
//! # Responsibilities
//! - Compile configured patterns once, at gate construction
//! - Resolve each rule's header name up front
//! - Test header values with unanchored search
//!
//! # Design Decisions
//! - All-or-nothing: the first invalid pattern rejects the whole rule set
//! - Values are matched as raw bytes, so non-UTF-8 headers still get tested
//! - Unicode mode stays on: `.` and negated classes never match a byte that is
//!   not valid UTF-8 (`^.abc` does not match `\xffabc`); literals around it do
//! - A missing header, an empty name or an unparseable name all read as ""

use axum::http::{header::HeaderName, HeaderMap};
use regex::bytes::Regex;
use thiserror::Error;

use crate::config::RuleConfig;

/// A configured pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid rule.reg {pattern}: {source}")]
pub struct CompilationError {
    /// Pattern text as it appeared in the configuration.
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Trait for testing a request's headers against a single rule.
pub trait HeaderMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the headers match this rule.
    fn matches(&self, headers: &HeaderMap) -> bool;
}

/// A rule whose pattern has already been compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    header: Option<HeaderName>,
    pattern: Regex,
}

impl CompiledRule {
    /// Compile a single rule.
    pub fn compile(spec: &RuleConfig) -> Result<Self, CompilationError> {
        let pattern = Regex::new(&spec.pattern).map_err(|source| CompilationError {
            pattern: spec.pattern.clone(),
            source,
        })?;

        Ok(Self {
            name: spec.name.clone(),
            header: HeaderName::from_bytes(spec.name.as_bytes()).ok(),
            pattern,
        })
    }

    /// Header field name, exactly as configured.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern source text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// First value of this rule's header, or an empty slice.
    pub fn header_value<'a>(&self, headers: &'a HeaderMap) -> &'a [u8] {
        self.header
            .as_ref()
            .and_then(|name| headers.get(name))
            .map(|value| value.as_bytes())
            .unwrap_or_default()
    }
}

impl HeaderMatcher for CompiledRule {
    fn matches(&self, headers: &HeaderMap) -> bool {
        self.pattern.is_match(self.header_value(headers))
    }
}

/// Compile an ordered rule list, preserving order.
pub fn compile(specs: &[RuleConfig]) -> Result<Vec<CompiledRule>, CompilationError> {
    specs.iter().map(CompiledRule::compile).collect()
}

/// Returns the first rule that matches, without evaluating any rule after it.
pub fn first_match<'r, M: HeaderMatcher>(rules: &'r [M], headers: &HeaderMap) -> Option<&'r M> {
    rules.iter().find(|rule| rule.matches(headers))
}
