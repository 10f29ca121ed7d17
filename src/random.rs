//! Random number source construction.
//!
//! Every operator takes its generator as an explicit `&mut R: Rng`
//! argument; there is no process-wide generator. This module only builds
//! the default seeded source.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a reproducible generator from a 64-bit seed.
///
/// Two generators created from the same seed yield identical streams, which
/// makes whole engine runs replayable.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from `seed`, or from system entropy when `None`.
pub fn create_rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
