//! Tour cost evaluation.
//!
//! Cost is the closed-circuit Euclidean length kept as `f64` with no
//! rounding. All rankings and tournaments compare costs with
//! [`f64::total_cmp`], so equal lengths always compare equal.

use super::types::{Tour, ANCHOR};
use crate::problem::City;

/// Computes closed-circuit lengths over a fixed coordinate list.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessEvaluator {
    cities: Vec<City>,
}

impl FitnessEvaluator {
    /// Wraps `cities` as given. [`cost`](Self::cost) panics if the list is
    /// empty; [`validate_cities`](crate::problem::validate_cities) rules
    /// that out before an engine evaluates anything.
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Length of `0 → tour[0] → … → tour[last] → 0`.
    ///
    /// # Panics
    /// Panics under the same conditions as [`circuit_length`].
    pub fn cost(&self, tour: &Tour) -> f64 {
        circuit_length(tour.genes(), &self.cities)
    }
}

/// Length of the closed circuit through `genes`, anchored at city 0.
///
/// # Panics
/// Panics if `cities` is empty (there is no anchor) or if `genes` holds an
/// index outside `cities`.
pub fn circuit_length(genes: &[usize], cities: &[City]) -> f64 {
    let anchor = &cities[ANCHOR];
    let mut prev = anchor;
    let mut total = 0.0;
    for &idx in genes {
        let next = &cities[idx];
        total += prev.distance_to(next);
        prev = next;
    }
    total + prev.distance_to(anchor)
}
