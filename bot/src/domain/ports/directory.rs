//! Guild directory port
//!
//! Read-only access to a guild's roles and members.

use async_trait::async_trait;

use crate::domain::entities::{GuildId, GuildSnapshot};
use crate::error::DiscordError;

#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Fetch role names and members (with their role names) in one snapshot
    async fn snapshot(&self, guild_id: GuildId) -> Result<GuildSnapshot, DiscordError>;
}
