//! Deterministic random streams.
//!
//! # Determinism strategy
//!
//! A run draws from exactly two independent `SmallRng` streams:
//!
//! - **positions**: field-node coordinates, consumed only while the network
//!   is built.
//! - **energy**: initial field-node energies and every later harvest draw.
//!
//! Keeping them apart means the topology depends only on the position seed.
//! Repeated trials hold the position seed fixed and vary the energy seed, so
//! every trial runs on the same graph while energy dynamics differ.
//!
//! Neither stream is global: both are owned values passed explicitly to the
//! code that consumes them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── SimRng ────────────────────────────────────────────────────────────────────

/// A single seedable random stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
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

    /// Uniform sample in the closed interval `[lo, hi]`.
    ///
    /// Returns `lo` without consuming randomness when the interval is a
    /// single point, so degenerate ranges (e.g. no harvesting) stay valid.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }
}

// ── RngStreams ────────────────────────────────────────────────────────────────

/// The pair of independent streams a simulation run consumes.
pub struct RngStreams {
    /// Drives field-node placement only.
    pub positions: SimRng,
    /// Drives initial energies and per-phase harvesting.
    pub energy: SimRng,
}

impl RngStreams {
    pub fn new(position_seed: u64, energy_seed: u64) -> Self {
        Self {
            positions: SimRng::new(position_seed),
            energy:    SimRng::new(energy_seed),
        }
    }
}
