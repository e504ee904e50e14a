//! Dexter Core Types and Traits
//!
//! This crate provides the fundamental types shared by every Dexter component:
//! - The response envelope returned by all data-access calls
//! - Request options and the `DataClient` abstraction
//! - Domain records (narratives, actors, alerts, reports, users)
//! - Typed resource calls used by the dashboard views
//! - Core error types

pub mod client;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod request;
pub mod resources;
pub mod sequence;

pub use client::{Api, DataClient};
pub use envelope::{ApiResponse, ResponseMeta};
pub use error::{Error, Result};
pub use request::{Method, QueryValue, RequestOptions};
