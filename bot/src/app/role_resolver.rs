//! Role resolver
//!
//! Maps a participant's roles to the weapon tier that matters for one command
//! variant. The gate role is matched by exact name; reactive roles are matched
//! case-insensitively on the whole display name.

use crate::domain::entities::{CommandVariant, Participant, TierRoleNames, WeaponTier};
use crate::error::RobberyError;

pub struct RoleResolver<'a> {
    names: &'a TierRoleNames,
    variant: CommandVariant,
    gate_role: &'a str,
}

impl<'a> RoleResolver<'a> {
    /// Build a resolver for `variant`, failing if the guild lacks any role the
    /// variant depends on.
    pub fn new(
        names: &'a TierRoleNames,
        variant: CommandVariant,
        guild_roles: &[String],
    ) -> Result<Self, RobberyError> {
        let gate_role = names
            .role_for(variant.gate_tier())
            .ok_or_else(|| RobberyError::Misconfigured(variant.gate_tier().to_string()))?;

        if !guild_roles.iter().any(|r| r == gate_role) {
            return Err(RobberyError::Misconfigured(gate_role.to_string()));
        }

        for tier in variant.reactive_tiers() {
            if let Some(role) = names.role_for(*tier) {
                if !guild_roles.iter().any(|r| r.eq_ignore_ascii_case(role)) {
                    return Err(RobberyError::Misconfigured(role.to_string()));
                }
            }
        }

        Ok(Self {
            names,
            variant,
            gate_role,
        })
    }

    pub fn gate_role(&self) -> &str {
        self.gate_role
    }

    pub fn holds_gate(&self, participant: &Participant) -> bool {
        participant.has_role(self.gate_role)
    }

    /// Tier the caller attacks with: the variant's gate tier, or `None`
    pub fn attacker_tier(&self, participant: &Participant) -> WeaponTier {
        if self.holds_gate(participant) {
            self.variant.gate_tier()
        } else {
            WeaponTier::None
        }
    }

    /// Highest-precedence reactive tier the participant holds
    pub fn resolve_tier(&self, participant: &Participant) -> WeaponTier {
        self.variant
            .reactive_tiers()
            .iter()
            .copied()
            .find(|tier| {
                self.names
                    .role_for(*tier)
                    .is_some_and(|role| participant.has_role_ignore_case(role))
            })
            .unwrap_or(WeaponTier::None)
    }
}
