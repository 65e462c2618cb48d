//! Discord adapter
//!
//! Guild directory and interaction responses over the Discord REST API.

pub mod client;
pub mod responder;

pub use client::DiscordClient;
pub use responder::DiscordResponder;
