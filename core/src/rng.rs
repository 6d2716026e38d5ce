//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through a single GenRng seeded from the run
//! seed, and every sampling routine receives the stream explicitly.
//!
//! Sampling code is generic over `R: Rng + ?Sized`, so tests can swap
//! the stream for `rand::rngs::mock::StepRng` and assert exact values.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The one seeded stream for a generation run.
pub struct GenRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl GenRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for GenRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Sampling helpers shared by the synthesizer and the injector.
pub trait Draw: Rng {
    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.gen::<f64>() < p
    }

    /// Roll a float in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.gen_range(lo..hi)
    }

    /// Cumulative-roll categorical draw. If rounding leaves the weights
    /// a hair short of 1.0, the last entry absorbs the remainder.
    ///
    /// Panics if `table` is empty.
    fn pick_weighted<'a, T>(&mut self, table: &'a [(T, f64)]) -> &'a T {
        let roll = self.gen::<f64>();
        let mut cumulative = 0.0;
        for (item, weight) in table {
            cumulative += weight;
            if roll < cumulative {
                return item;
            }
        }
        &table[table.len() - 1].0
    }

    /// Panics if `items` is empty.
    fn pick_uniform<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.gen_range(0..items.len())]
    }
}

impl<R: Rng + ?Sized> Draw for R {}
