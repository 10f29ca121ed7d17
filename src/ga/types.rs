//! Solution representation.
//!
//! A [`Tour`] is a permutation of the non-anchor cities `1..n`. City 0 never
//! appears in it; the closed circuit is implicitly
//! `0 → tour[0] → … → tour[n-2] → 0`.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// The implicit start and end of every circuit.
pub const ANCHOR: usize = 0;

/// A candidate solution: the visiting order of cities `1..city_count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// The tour `[1, 2, …, city_count - 1]`.
    pub fn identity(city_count: usize) -> Self {
        Self((1..city_count.max(1)).collect())
    }

    /// A uniformly random permutation of `1..city_count`.
    pub fn random<R: Rng>(city_count: usize, rng: &mut R) -> Self {
        let mut tour = Self::identity(city_count);
        tour.0.shuffle(rng);
        tour
    }

    /// Wraps `genes` after checking the permutation invariant.
    pub fn try_new(genes: Vec<usize>, city_count: usize) -> Result<Self> {
        let tour = Self(genes);
        tour.validate(city_count)?;
        Ok(tour)
    }

    /// Wraps `genes` without checking. Operators preserve the invariant, so
    /// tours they produce go through here.
    pub(crate) fn from_genes(genes: Vec<usize>) -> Self {
        Self(genes)
    }

    /// The visiting order, excluding the anchor.
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Number of non-anchor cities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.0
    }

    /// The same circuit traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut genes = self.0.clone();
        genes.reverse();
        Self(genes)
    }

    /// The full closed circuit, anchor included at both ends.
    pub fn circuit(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(ANCHOR)
            .chain(self.0.iter().copied())
            .chain(std::iter::once(ANCHOR))
    }

    /// Checks that this tour visits every city in `1..city_count` exactly once.
    pub fn validate(&self, city_count: usize) -> Result<()> {
        let expected = city_count.saturating_sub(1);
        if self.0.len() != expected {
            return Err(Error::MalformedTour {
                reason: format!("length {} but expected {expected}", self.0.len()),
            });
        }
        let mut seen = vec![false; city_count];
        for &city in &self.0 {
            if city == ANCHOR || city >= city_count {
                return Err(Error::MalformedTour {
                    reason: format!("city index {city} outside 1..{city_count}"),
                });
            }
            if seen[city] {
                return Err(Error::MalformedTour {
                    reason: format!("city {city} visited twice"),
                });
            }
            seen[city] = true;
        }
        Ok(())
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// A population member: a tour and its cached cost.
///
/// The cost is `f64::INFINITY` until the population is ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    tour: Tour,
    cost: f64,
}

impl Individual {
    /// An unevaluated individual.
    pub fn new(tour: Tour) -> Self {
        Self {
            tour,
            cost: f64::INFINITY,
        }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Cost recorded at the last ranking.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}
