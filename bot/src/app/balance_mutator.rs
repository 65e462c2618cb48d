//! Balance mutator
//!
//! Applies an outcome's mutation plan through the economy port, one call per
//! leg, in plan order. Failures are recorded per leg and never retried.

use std::sync::Arc;

use crate::domain::entities::{
    Direction, GuildId, LegResult, Outcome, Party, SettledLeg, Settlement, UserId,
};
use crate::domain::ports::EconomyClient;
use crate::error::EconomyError;

pub struct BalanceMutator<EC>
where
    EC: EconomyClient,
{
    economy: Arc<EC>,
}

impl<EC> BalanceMutator<EC>
where
    EC: EconomyClient,
{
    pub fn new(economy: Arc<EC>) -> Self {
        Self { economy }
    }

    /// Apply a single mutation and return the new cash balance
    pub async fn apply(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
        direction: Direction,
    ) -> Result<i64, EconomyError> {
        let balance = match direction {
            Direction::Add => self.economy.add_money(guild_id, user_id, amount).await?,
            Direction::Remove => self.economy.remove_money(guild_id, user_id, amount).await?,
        };
        Ok(balance.cash)
    }

    /// Run the outcome's mutation plan. A leg that depends on a failed leg is skipped.
    pub async fn settle(
        &self,
        guild_id: GuildId,
        outcome: &Outcome,
        attacker: UserId,
        target: UserId,
    ) -> Settlement {
        let mut legs = Vec::new();
        let mut previous_ok = true;

        for leg in outcome.mutation_plan() {
            let user_id = match leg.party {
                Party::Attacker => attacker,
                Party::Target => target,
            };

            let result = if leg.requires_previous && !previous_ok {
                tracing::warn!(
                    guild_id = %guild_id,
                    user_id = %user_id,
                    amount = leg.amount,
                    direction = %leg.direction,
                    "Skipping mutation after failed prerequisite"
                );
                LegResult::Skipped
            } else {
                match self.apply(guild_id, user_id, leg.amount, leg.direction).await {
                    Ok(balance) => {
                        tracing::info!(
                            guild_id = %guild_id,
                            user_id = %user_id,
                            party = %leg.party,
                            amount = leg.amount,
                            direction = %leg.direction,
                            balance,
                            "Balance mutated"
                        );
                        LegResult::Applied { balance }
                    }
                    Err(e) => {
                        tracing::error!(
                            guild_id = %guild_id,
                            user_id = %user_id,
                            party = %leg.party,
                            amount = leg.amount,
                            direction = %leg.direction,
                            error = %e,
                            "Balance mutation failed"
                        );
                        LegResult::Failed
                    }
                }
            };

            previous_ok = matches!(result, LegResult::Applied { .. });
            legs.push(SettledLeg {
                leg,
                user_id,
                result,
            });
        }

        Settlement { legs }
    }
}
