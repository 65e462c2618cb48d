//! HTTP handlers
//!
//! Axum request handlers for the keep-alive and relay endpoints.

pub mod health;
pub mod interactions;

pub use health::health;
pub use interactions::post_interaction;
