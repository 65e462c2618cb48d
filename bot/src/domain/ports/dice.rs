//! Random draw port

use std::ops::RangeInclusive;

/// Source of uniform integer draws
pub trait Dice: Send + Sync {
    /// Draw uniformly from `range`, bounds inclusive. Every call is an independent draw.
    fn roll(&self, range: RangeInclusive<u64>) -> u64;
}
