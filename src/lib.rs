//! Header gate for HTTP reverse-proxy pipelines.
//!
//! Blocks requests whose headers match configured regular expressions and
//! forwards everything else to the next stage untouched.

pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use gate::{BlockHeader, BlockHeaderLayer, CompilationError, Gate};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
