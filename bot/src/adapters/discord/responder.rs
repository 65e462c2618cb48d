//! Interaction responder backed by the Discord REST client

use std::sync::Arc;

use async_trait::async_trait;

use super::client::{DiscordClient, MessagePayload};
use crate::domain::ports::InteractionResponder;
use crate::error::DiscordError;

/// Replies to one interaction
pub struct DiscordResponder {
    client: Arc<DiscordClient>,
    interaction_id: String,
    token: String,
}

impl DiscordResponder {
    pub fn new(client: Arc<DiscordClient>, interaction_id: String, token: String) -> Self {
        Self {
            client,
            interaction_id,
            token,
        }
    }
}

#[async_trait]
impl InteractionResponder for DiscordResponder {
    async fn respond(&self, content: &str, ephemeral: bool) -> Result<(), DiscordError> {
        self.client
            .create_interaction_response(
                &self.interaction_id,
                &self.token,
                &MessagePayload::new(content, ephemeral),
            )
            .await
    }

    async fn defer(&self) -> Result<(), DiscordError> {
        self.client
            .create_deferred_response(&self.interaction_id, &self.token)
            .await
    }

    async fn follow_up(&self, content: &str) -> Result<(), DiscordError> {
        self.client
            .create_followup_message(&self.token, &MessagePayload::new(content, false))
            .await
    }
}
