//! Payout configuration constants
//!
//! Cash ranges drawn by the outcome engine. All bounds are inclusive.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Cash taken when a high-tier robbery succeeds
pub const HIGH_TIER_HAUL: RangeInclusive<u64> = 25_000..=50_000;

/// Attacker penalty when a high-tier robbery hits a shotgun
pub const HIGH_TIER_DEFENSE_PENALTY: RangeInclusive<u64> = 10_000..=15_000;

/// Per-side penalty when two high-tier holders shoot it out
pub const GUNFIGHT_PENALTY: RangeInclusive<u64> = 5_000..=15_000;

/// Cash taken when a pistol robbery succeeds
pub const PISTOL_HAUL: RangeInclusive<u64> = 500..=10_000;

/// Attacker penalty when a pistol robbery hits a submachine gun
pub const PISTOL_DEFENSE_PENALTY: RangeInclusive<u64> = 5_000..=10_000;

/// Per-side penalty in a pistol-vs-pistol standoff
pub const PISTOL_STANDOFF_PENALTY: RangeInclusive<u64> = 1_000..=5_000;

/// Default pause after each narration line
pub const NARRATION_DELAY: Duration = Duration::from_millis(1500);

/// Upper bound on lines a single narration may send
pub const MAX_NARRATION_LINES: usize = 8;

/// How long the guild fetch may run before the interaction is deferred.
/// Discord drops interactions left unanswered for three seconds.
pub const ACK_DEADLINE: Duration = Duration::from_secs(2);
