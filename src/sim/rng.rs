//! Randomness for the spawner
//!
//! The spawner only ever asks for uniform draws in `[0, 1)`, so that is the
//! whole interface. Live sessions use a PCG stream; tests and scripted
//! scenarios feed a fixed sequence.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// PCG stream seeded from `seed`, or from OS entropy when absent
pub fn pcg_from(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    }
}

/// Replays a fixed list of draws, then keeps returning a fallback
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedSource {
    /// Once the list runs out every draw is just below 1.0, which never
    /// passes a spawn chance.
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.999,
        }
    }

    /// Source that never spawns anything
    pub fn quiet() -> Self {
        Self::new([])
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
