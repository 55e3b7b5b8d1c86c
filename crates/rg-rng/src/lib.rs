//! Linear-congruential random number generator
//!
//! A faithful port of the classic dungeon generator: a 32-bit state advanced
//! by `seed * 11109 + 13849`, yielding the high half masked to 16 bits.
//! Every stochastic decision of the simulation funnels through one instance.

use serde::{Deserialize, Serialize};

/// LCG multiplier
const MULTIPLIER: u32 = 11109;
/// LCG increment
const INCREMENT: u32 = 13849;

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name (e.g. "rnd", "roll")
    pub func: &'static str,
    /// Argument (modulus for rnd, sides for roll)
    pub arg: u32,
    /// Result value
    pub result: u32,
}

/// Linear-congruential generator context
#[derive(Clone, Serialize, Deserialize)]
pub struct Lcg {
    /// Current state
    state: u32,
    /// Seed the generator was created with
    seed: u32,
    /// Total number of raw values consumed
    call_count: u64,
    /// If true, record all calls into trace log
    #[serde(skip)]
    tracing: bool,
    /// Trace log (only populated when tracing is true)
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for Lcg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lcg")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl Lcg {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed,
            seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the state and return the next raw 16-bit value
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.call_count += 1;
        (self.state >> 16) & 0xffff
    }

    fn record(&mut self, func: &'static str, arg: u32, result: u32) {
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func,
                arg,
                result,
            });
        }
    }

    /// Returns a random value in [0, range)
    ///
    /// Returns 0 if range is 0.
    pub fn rnd(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        let res = self.next_raw() % range;
        self.record("rnd", range, res);
        res
    }

    /// Roll `count` dice of `sides` sides (each die in 1..=sides)
    pub fn roll(&mut self, count: u32, sides: u32) -> u32 {
        let mut total = 0;
        for _ in 0..count {
            total += self.rnd(sides) + 1;
        }
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count.saturating_sub(1),
                func: "roll",
                arg: sides,
                result: total,
            });
        }
        total
    }

    /// Spread a duration a little around its nominal value
    pub fn spread(&mut self, nominal: u32) -> u32 {
        nominal - nominal / 20 + self.rnd(nominal / 10)
    }

    /// Enable RNG tracing
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Disable RNG tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Get current RNG trace
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Total number of raw values consumed
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(0)
    }
}

impl rand::RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        (self.next_raw() << 16) | self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(2) {
            let bytes = (self.next_raw() as u16).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
