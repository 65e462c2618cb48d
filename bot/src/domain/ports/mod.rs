//! Domain ports (traits)
//!
//! Port traits define interfaces that the game core requires.
//! Adapters provide concrete implementations of these traits.

pub mod dice;
pub mod directory;
pub mod economy;
pub mod pacer;
pub mod responder;

pub use dice::Dice;
pub use directory::GuildDirectory;
pub use economy::{Balance, EconomyClient};
pub use pacer::Pacer;
pub use responder::InteractionResponder;

#[cfg(test)]
pub use economy::MockEconomyClient;
