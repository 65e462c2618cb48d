//! Economy service port
//!
//! Balance mutations against the external economy bot. The service is the sole
//! arbiter of balance floors; callers never clamp.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{GuildId, UserId};
use crate::error::EconomyError;

/// Balance reported after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub cash: i64,
    pub bank: i64,
    pub total: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EconomyClient: Send + Sync {
    async fn add_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError>;

    async fn remove_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError>;
}
