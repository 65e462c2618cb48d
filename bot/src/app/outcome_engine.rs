//! Outcome engine
//!
//! Decision table from (attacker tier, target tier) to an outcome. Rows are
//! evaluated top to bottom and the first match wins.
//!
//! High-tier family (`gunpoint`, `woozie`):
//!
//! | Target holds | Outcome                                   |
//! |--------------|-------------------------------------------|
//! | high tier    | Standoff, both pay `GUNFIGHT_PENALTY`      |
//! | shotgun      | Defended, attacker pays `HIGH_TIER_DEFENSE_PENALTY` |
//! | anything else| Robbed for `HIGH_TIER_HAUL`               |
//!
//! Pistol family (`plock`):
//!
//! | Target holds   | Outcome                                  |
//! |----------------|------------------------------------------|
//! | submachine gun | Defended, attacker pays `PISTOL_DEFENSE_PENALTY` |
//! | shotgun        | Evaded                                   |
//! | pistol         | Standoff, both pay `PISTOL_STANDOFF_PENALTY` |
//! | anything else  | Robbed for `PISTOL_HAUL`                 |

use crate::app::payout_config::{
    GUNFIGHT_PENALTY, HIGH_TIER_DEFENSE_PENALTY, HIGH_TIER_HAUL, PISTOL_DEFENSE_PENALTY,
    PISTOL_HAUL, PISTOL_STANDOFF_PENALTY,
};
use crate::domain::entities::{CommandFamily, CommandVariant, Outcome, WeaponTier};
use crate::domain::ports::Dice;

/// Resolve an encounter. An attacker without the variant's gate tier is `Forbidden`.
pub fn resolve<D: Dice + ?Sized>(
    attacker_tier: WeaponTier,
    target_tier: WeaponTier,
    variant: CommandVariant,
    dice: &D,
) -> Outcome {
    if attacker_tier != variant.gate_tier() {
        return Outcome::Forbidden;
    }

    match variant.family() {
        CommandFamily::HighTier => match target_tier {
            WeaponTier::HighTier => Outcome::Standoff {
                attacker_penalty: dice.roll(GUNFIGHT_PENALTY),
                target_penalty: dice.roll(GUNFIGHT_PENALTY),
            },
            WeaponTier::Shotgun => Outcome::Defended {
                penalty: dice.roll(HIGH_TIER_DEFENSE_PENALTY),
            },
            _ => Outcome::Robbed {
                amount: dice.roll(HIGH_TIER_HAUL),
            },
        },
        CommandFamily::Pistol => match target_tier {
            WeaponTier::SubmachineGun => Outcome::Defended {
                penalty: dice.roll(PISTOL_DEFENSE_PENALTY),
            },
            WeaponTier::Shotgun => Outcome::Evaded,
            WeaponTier::Pistol => Outcome::Standoff {
                attacker_penalty: dice.roll(PISTOL_STANDOFF_PENALTY),
                target_penalty: dice.roll(PISTOL_STANDOFF_PENALTY),
            },
            _ => Outcome::Robbed {
                amount: dice.roll(PISTOL_HAUL),
            },
        },
    }
}
