//! Dexter Fixtures
//!
//! In-memory stand-in for the dashboard API, used during local development:
//! - Static fixture records for every resource family
//! - `FixtureClient`, a `DataClient` that serves them after a randomized
//!   delay and occasionally injects a failure

pub mod data;
pub mod dispatcher;

pub use data::{Fixtures, fixtures};
pub use dispatcher::{FixtureClient, FixtureConfig, ResourceFamily, dispatch};
