//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a configured level.
pub fn default_directive(level: &str) -> String {
    format!("header_gate={level},tower_http={level}")
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "header_gate=debug,tower_http=debug");
    }

    #[test]
    fn test_init_twice() {
        init_logging("info");
        init_logging("info");
    }
}
