//! Deals the numbers and target for a round.
//!
//! Targets are drawn independently of the numbers, so a round is not
//! guaranteed to be solvable.

use crate::core::constants::{
    EASY_TIER_MAX_LEVEL, LEVELS_PER_EXTRA_NUMBER, MAX_NUMBER_COUNT, MEDIUM_TIER_MAX_LEVEL,
    MIN_NUMBER_COUNT, ROUND_BASE_SECONDS, ROUND_MIN_SECONDS,
};
use rand::Rng;
use std::ops::RangeInclusive;

/// How many numbers are dealt at `level`.
pub fn number_count(level: u32) -> usize {
    (MIN_NUMBER_COUNT + (level / LEVELS_PER_EXTRA_NUMBER) as usize).min(MAX_NUMBER_COUNT)
}

/// Inclusive range each dealt number is drawn from.
pub fn number_range(level: u32) -> RangeInclusive<u32> {
    if level <= EASY_TIER_MAX_LEVEL {
        1..=20
    } else if level <= MEDIUM_TIER_MAX_LEVEL {
        1..=50
    } else {
        1..=100
    }
}

/// Inclusive range the target is drawn from.
pub fn target_range(level: u32) -> RangeInclusive<u32> {
    if level <= EASY_TIER_MAX_LEVEL {
        10..=59
    } else if level <= MEDIUM_TIER_MAX_LEVEL {
        20..=219
    } else {
        50..=549
    }
}

/// Seconds on the clock when a round at `level` starts.
pub fn round_duration(level: u32) -> u32 {
    ROUND_BASE_SECONDS
        .saturating_sub(level)
        .max(ROUND_MIN_SECONDS)
}

/// Deal the numbers for a round. Duplicates are allowed.
pub fn generate_numbers<R: Rng>(level: u32, rng: &mut R) -> Vec<u32> {
    let range = number_range(level);
    (0..number_count(level))
        .map(|_| rng.gen_range(range.clone()))
        .collect()
}

pub fn generate_target<R: Rng>(level: u32, rng: &mut R) -> u32 {
    rng.gen_range(target_range(level))
}
