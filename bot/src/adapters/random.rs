//! Random draws from the thread-local PRNG

use std::ops::RangeInclusive;

use rand::Rng;

use crate::domain::ports::Dice;

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn roll(&self, range: RangeInclusive<u64>) -> u64 {
        rand::thread_rng().gen_range(range)
    }
}
