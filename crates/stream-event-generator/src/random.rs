//! Random source abstraction used by the event generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The two random decisions the generator makes per event.
pub trait RandomSource {
    /// Pick an index uniformly from `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Return `true` with the given probability (in `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;
}

/// Draw a fresh seed from the thread RNG, for runs that were not given one.
pub fn random_seed() -> u64 {
    rand::random()
}

/// Random source backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded source: the same seed always yields the same decisions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}
