//! One generation's collection of tours.

use super::fitness::FitnessEvaluator;
use super::types::{Individual, Tour};
use rand::Rng;

/// An ordered sequence of individuals.
///
/// Order is insertion order until [`rank`](Population::rank) sorts it by
/// ascending cost.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    /// `size` independent uniformly random tours over `city_count` cities.
    pub fn random<R: Rng>(size: usize, city_count: usize, rng: &mut R) -> Self {
        let members = (0..size)
            .map(|_| Individual::new(Tour::random(city_count, rng)))
            .collect();
        Self { members }
    }

    pub fn from_tours(tours: impl IntoIterator<Item = Tour>) -> Self {
        Self {
            members: tours.into_iter().map(Individual::new).collect(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, individual: Individual) {
        self.members.push(individual);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn tours(&self) -> impl Iterator<Item = &Tour> + '_ {
        self.members.iter().map(Individual::tour)
    }

    /// The first member; the cheapest one after [`rank`](Population::rank).
    pub fn first(&self) -> Option<&Individual> {
        self.members.first()
    }

    /// Evaluates every member and sorts ascending by cost.
    ///
    /// The sort is stable, so equal-cost tours keep their relative order and
    /// the ranking is reproducible.
    pub fn rank(&mut self, evaluator: &FitnessEvaluator) {
        for ind in &mut self.members {
            let cost = evaluator.cost(ind.tour());
            ind.set_cost(cost);
        }
        self.members.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
    }
}
