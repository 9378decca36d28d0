// src/rng.rs
//! Random Number Generation for Langevin Simulations
//!
//! # Design Philosophy
//!
//! The stochastic step consumes entropy sequentially, one cell after another,
//! so a simulation is reproducible exactly when its generator is:
//! 1. **Reproducibility**: Same seed → same field trajectory
//! 2. **Parallel safety**: Ensemble members never share a generator
//! 3. **Independence of thread count**: stream `i` depends only on
//!    `(master_seed, i)`, never on which worker runs it
//!
//! # Stream Derivation
//!
//! Per-member seeds are derived from the master seed with a splitmix64
//! finalizer, so neighbouring member indices give unrelated seeds:
//! ```text
//! z = master_seed + (stream + 1) * 0x9e3779b97f4a7c15
//! z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
//! z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
//! seed = z ⊕ (z >> 31)
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Factory handing out independent, reproducible generator streams
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    master_seed: u64,
}

impl RngFactory {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed for stream `stream` (ensemble member, worker, ...)
    pub fn stream_seed(&self, stream: u64) -> u64 {
        let mut z = self
            .master_seed
            .wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9e3779b97f4a7c15u64));
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9u64);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111ebu64);
        z ^ (z >> 31)
    }

    /// Create a standard RNG for a specific stream
    pub fn create_std_rng(&self, stream: u64) -> StdRng {
        StdRng::seed_from_u64(self.stream_seed(stream))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
