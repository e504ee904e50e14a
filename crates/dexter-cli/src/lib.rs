//! Dexter CLI
//!
//! Operational shell over the data-access client and the session store:
//! - Configuration loading (file + environment)
//! - Bootstrap of the data backend and session storage
//! - Command definitions and execution

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;

pub use config::{AppConfig, ClientMode};
