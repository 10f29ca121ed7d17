//! Tournament selection.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament size for a population: `max(3, population_size / 50)`.
///
/// Pressure grows mildly with population size without a full sort per
/// selection.
pub fn tournament_size(population_size: usize) -> usize {
    (population_size / 50).max(3)
}

/// Picks `k` members uniformly *with replacement* and returns the index of
/// the cheapest one.
///
/// `k` may exceed the population size; duplicates are simply drawn more than
/// once. Ties keep the earliest draw.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].cost().total_cmp(&population[best_idx].cost()).is_lt() {
            best_idx = idx;
        }
    }
    best_idx
}
