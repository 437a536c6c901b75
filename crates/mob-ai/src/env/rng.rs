//! Deterministic RNG oracle for chance-based decisions.
//!
//! The engine rolls dice in exactly two places: the door-open attempt during
//! investigation replay and the bounce direction after an abandoned
//! investigation. Both draw from a seed derived from the acting mob and the
//! current tick, so a replayed pulse makes the same decisions.

use crate::types::{MobId, Tick};

/// Deterministic random source. Given the same seed, implementations must
/// produce the same value.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// Mixes a mob identity, the current tick, and a per-decision salt into a
/// seed for [`RngOracle`] calls.
pub fn decision_seed(mob: MobId, now: Tick, salt: u64) -> u64 {
    // SplitMix64-style finalizer over the three inputs.
    let mut z = (mob.0 as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(now.0)
        .wrapping_add(salt.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// PCG-XSH-RR generator: stateless, seed-in value-out.
///
/// Small state, fast, and statistically solid; the same variant the rest of
/// the corpus uses for deterministic game rolls.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        // Two LCG steps decorrelate adjacent seeds before the output
        // permutation.
        let state = Self::pcg_step(Self::pcg_step(seed));
        Self::pcg_output(state)
    }
}
