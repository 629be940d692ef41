//! Randomness seam for the simulation
//!
//! The formation generator and the enemy fire roll only ever ask three kinds
//! of question. Any `rand::Rng` answers them; tests can answer them from a
//! script instead.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    /// Uniform integer in `low..=high`
    fn int_in(&mut self, low: u32, high: u32) -> u32;
    /// `true` with the given probability, clamped to `[0, 1]`
    fn chance(&mut self, probability: f64) -> bool;
    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn int_in(&mut self, low: u32, high: u32) -> u32 {
        self.random_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.random_bool(probability.clamp(0.0, 1.0))
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// The game's default generator: seeded when a seed is configured, otherwise
/// from OS entropy
pub fn game_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    }
}
