//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - Most ports take `&str` or return data tests want to inspect afterwards
//! - Recording doubles let a test assert on the full call history
//! - `MockEconomyClient` (mockall) is still used where call expectations read better
//!
//! Handler tests build the router with real adapters pointed at an
//! unroutable address; they only exercise paths that never reach Discord.
//! Adapter tests that need HTTP traffic point the client at `serve_stub`.

pub mod fixtures;
pub mod mocks;
pub mod stub_server;

pub use fixtures::*;
pub use mocks::*;
pub use stub_server::serve_stub;
