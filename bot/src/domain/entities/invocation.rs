//! Invocation domain entity

use super::{CommandVariant, GuildId, UserId};

/// A parsed robbery command: who ran it, where, and against whom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub guild_id: GuildId,
    pub command: CommandVariant,
    pub caller_id: UserId,
    /// Random eligible member when absent
    pub target_id: Option<UserId>,
}
