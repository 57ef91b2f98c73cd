//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → gate (block on first matching header rule)
//!     → upstream.rs (forward to the single configured upstream)
//!     → Send upstream response to client untouched
//! ```

pub mod server;
pub mod upstream;

pub use server::{HttpServer, StartupError};
pub use upstream::Upstream;
