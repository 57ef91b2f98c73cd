//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gate, http server
//!     → tracing events (block decisions, forwarding, upstream errors)
//!     → logging.rs (subscriber, env filter, stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields (gate, header, pattern) instead of formatted messages
//! - No metrics: the gate only logs

pub mod logging;

pub use logging::init_logging;
