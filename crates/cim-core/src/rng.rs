//! Deterministic RNG for search and consensus.
//!
//! # Determinism strategy
//!
//! One `SearchRng` is seeded from the run's master seed.  Each consensus
//! agent derives its own independent stream via:
//!
//!   child_seed = next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state (no contention, no ordering dependency).
//! - Agent runs can execute sequentially or in parallel with identical
//!   results, because every child seed is fixed before any agent starts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG used by rollouts, tie-breaks, and consensus agents.
#[derive(Debug)]
pub struct SearchRng(SmallRng);

impl SearchRng {
    pub fn new(seed: u64) -> Self {
        SearchRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SearchRng` with a different seed offset — used to
    /// give each consensus agent independent reproducible randomness.
    pub fn child(&mut self, offset: u64) -> SearchRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SearchRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
