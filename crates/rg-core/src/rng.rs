//! Random number generation for the simulation
//!
//! Wraps the linear-congruential generator so every stochastic decision
//! is reproducible from a single seed.

use rg_rng::Lcg;
use serde::{Deserialize, Serialize};

/// The simulation's dice
///
/// Saves as its seed alone, so a restored game replays the same sequence
/// from the start of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct GameRng {
    rng: Lcg,
}

impl From<u32> for GameRng {
    fn from(seed: u32) -> Self {
        Self::new(seed)
    }
}

impl From<GameRng> for u32 {
    fn from(rng: GameRng) -> Self {
        rng.seed()
    }
}

impl GameRng {
    pub fn new(seed: u32) -> Self {
        Self { rng: Lcg::new(seed) }
    }

    /// Seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Uniform in `0..n`; zero when `n` is zero
    pub fn rnd(&mut self, n: u32) -> u32 {
        self.rng.rnd(n)
    }

    /// Roll `count` dice with `sides` sides
    pub fn roll(&mut self, count: u32, sides: u32) -> u32 {
        self.rng.roll(count, sides)
    }

    /// Nominal duration give or take a few percent
    pub fn spread(&mut self, n: u32) -> u32 {
        self.rng.spread(n)
    }

    /// True one time in `n`
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rnd(n) == 0
    }

    /// True `percent` times in a hundred
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rnd(100) < percent
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let n = u32::try_from(items.len()).ok().filter(|&n| n > 0)?;
        items.get(self.rnd(n) as usize)
    }

    /// The generator underneath, for switching call tracing on
    pub fn lcg_mut(&mut self) -> &mut Lcg {
        &mut self.rng
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(42)
    }
}
