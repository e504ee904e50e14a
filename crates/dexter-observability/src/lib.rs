//! Dexter Observability
//!
//! Structured logging setup shared by the binaries:
//! - Level and format configuration
//! - `tracing-subscriber` installation writing to stderr

pub mod logging;

pub use logging::{LogFormat, LoggingConfig, init_logging};
