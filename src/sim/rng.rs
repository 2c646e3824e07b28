//! Injectable random source
//!
//! Spawning and placement draw through this trait so rounds can be
//! seeded and tests can script the draws.

use rand::Rng;

/// Object-safe randomness used by the simulation
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn unit_f32(&mut self) -> f32;

    /// Uniform index in [lo, hi] (inclusive). Returns `lo` when `hi <= lo`.
    fn range_usize(&mut self, lo: usize, hi: usize) -> usize;

    /// Uniform value in [lo, hi). Returns `lo` when the range is empty.
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.unit_f32()
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.unit_f32() < p
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn unit_f32(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn range_usize(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}
