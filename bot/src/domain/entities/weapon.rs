//! Weapon tiers and command variants
//!
//! Tiers are derived from role membership. Each command variant belongs to a
//! family that decides which tier gates the command and which tiers on the
//! target change the outcome.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Role-derived rank used both to attack and to react
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponTier {
    None,
    Pistol,
    Shotgun,
    SubmachineGun,
    HighTier,
}

impl std::fmt::Display for WeaponTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeaponTier::None => write!(f, "none"),
            WeaponTier::Pistol => write!(f, "pistol"),
            WeaponTier::Shotgun => write!(f, "shotgun"),
            WeaponTier::SubmachineGun => write!(f, "submachine_gun"),
            WeaponTier::HighTier => write!(f, "high_tier"),
        }
    }
}

/// Decision-table family a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandFamily {
    HighTier,
    Pistol,
}

/// Slash command that starts a robbery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandVariant {
    Gunpoint,
    Woozie,
    Plock,
}

impl CommandVariant {
    pub const ALL: [CommandVariant; 3] = [
        CommandVariant::Gunpoint,
        CommandVariant::Woozie,
        CommandVariant::Plock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandVariant::Gunpoint => "gunpoint",
            CommandVariant::Woozie => "woozie",
            CommandVariant::Plock => "plock",
        }
    }

    pub fn family(&self) -> CommandFamily {
        match self {
            CommandVariant::Gunpoint | CommandVariant::Woozie => CommandFamily::HighTier,
            CommandVariant::Plock => CommandFamily::Pistol,
        }
    }

    /// Tier the caller must hold to use the command at all
    pub fn gate_tier(&self) -> WeaponTier {
        match self.family() {
            CommandFamily::HighTier => WeaponTier::HighTier,
            CommandFamily::Pistol => WeaponTier::Pistol,
        }
    }

    /// Target tiers that change the outcome, highest precedence first
    pub fn reactive_tiers(&self) -> &'static [WeaponTier] {
        match self.family() {
            CommandFamily::HighTier => &[WeaponTier::HighTier, WeaponTier::Shotgun],
            CommandFamily::Pistol => &[
                WeaponTier::SubmachineGun,
                WeaponTier::Shotgun,
                WeaponTier::Pistol,
            ],
        }
    }
}

impl std::fmt::Display for CommandVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for CommandVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gunpoint" => Ok(CommandVariant::Gunpoint),
            "woozie" => Ok(CommandVariant::Woozie),
            "plock" => Ok(CommandVariant::Plock),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// Role display name for each tier, loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRoleNames {
    pub high_tier: String,
    pub shotgun: String,
    pub submachine_gun: String,
    pub pistol: String,
}

impl Default for TierRoleNames {
    fn default() -> Self {
        Self {
            high_tier: "Woozie".to_string(),
            shotgun: "Shotgun".to_string(),
            submachine_gun: "Uzi".to_string(),
            pistol: "Glock".to_string(),
        }
    }
}

impl TierRoleNames {
    pub fn role_for(&self, tier: WeaponTier) -> Option<&str> {
        match tier {
            WeaponTier::None => None,
            WeaponTier::Pistol => Some(&self.pistol),
            WeaponTier::Shotgun => Some(&self.shotgun),
            WeaponTier::SubmachineGun => Some(&self.submachine_gun),
            WeaponTier::HighTier => Some(&self.high_tier),
        }
    }

    /// Every tier needs its own non-empty role name
    pub fn validate(&self) -> Result<(), DomainError> {
        let names = [
            ("high tier", &self.high_tier),
            ("shotgun", &self.shotgun),
            ("submachine gun", &self.submachine_gun),
            ("pistol", &self.pistol),
        ];

        for (tier, name) in names {
            if name.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "role name for {} tier is empty",
                    tier
                )));
            }
        }

        for (i, (tier_a, a)) in names.iter().enumerate() {
            for (tier_b, b) in &names[i + 1..] {
                if a.eq_ignore_ascii_case(b) {
                    return Err(DomainError::Validation(format!(
                        "{} and {} tiers share the role name '{}'",
                        tier_a, tier_b, a
                    )));
                }
            }
        }

        Ok(())
    }
}
