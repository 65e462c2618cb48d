//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod discord;
pub mod pacer;
pub mod random;
pub mod unbelievaboat;

pub use discord::{DiscordClient, DiscordResponder};
pub use pacer::TokioPacer;
pub use random::ThreadDice;
pub use unbelievaboat::UnbelievaBoatClient;
