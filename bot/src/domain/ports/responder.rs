//! Interaction responder port
//!
//! Sends messages back to the channel a command was invoked from.

use async_trait::async_trait;

use crate::error::DiscordError;

#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Initial response to the interaction. Must be sent at most once.
    async fn respond(&self, content: &str, ephemeral: bool) -> Result<(), DiscordError>;

    /// Acknowledge without content. Counts as the initial response; the
    /// next message must be a follow-up.
    async fn defer(&self) -> Result<(), DiscordError>;

    /// Follow-up message after the initial response
    async fn follow_up(&self, content: &str) -> Result<(), DiscordError>;
}
