//! Domain entities
//!
//! Per-invocation models. Nothing here outlives a single command.

pub mod invocation;
pub mod outcome;
pub mod participant;
pub mod settlement;
pub mod weapon;

pub use invocation::Invocation;
pub use outcome::{Direction, MutationLeg, Outcome, Party};
pub use participant::{GuildId, GuildSnapshot, Participant, UserId};
pub use settlement::{LegResult, SettledLeg, Settlement, SettlementStatus};
pub use weapon::{CommandFamily, CommandVariant, TierRoleNames, WeaponTier};
