//! Reply channel for one invocation
//!
//! Tracks whether the interaction has been acknowledged so the first message
//! goes out as the initial response and everything after as a follow-up.

use crate::domain::ports::InteractionResponder;
use crate::error::DiscordError;

pub struct Reply<'a, R: InteractionResponder + ?Sized> {
    responder: &'a R,
    acknowledged: bool,
}

impl<'a, R: InteractionResponder + ?Sized> Reply<'a, R> {
    pub fn new(responder: &'a R) -> Self {
        Self {
            responder,
            acknowledged: false,
        }
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Acknowledge the interaction without a message, if nothing has been
    /// sent yet. Later messages go out as follow-ups.
    pub async fn acknowledge(&mut self) -> Result<(), DiscordError> {
        if !self.acknowledged {
            self.responder.defer().await?;
            self.acknowledged = true;
        }
        Ok(())
    }

    /// Send `content`. `ephemeral` only applies to the initial response.
    pub async fn say(&mut self, content: &str, ephemeral: bool) -> Result<(), DiscordError> {
        if self.acknowledged {
            self.responder.follow_up(content).await
        } else {
            self.responder.respond(content, ephemeral).await?;
            self.acknowledged = true;
            Ok(())
        }
    }
}
