//! Engine configuration.
//!
//! [`TspConfig`] holds every parameter of the evolutionary loop. Elite count
//! and tournament size are derived from the population size rather than
//! configured.

use super::selection::tournament_size;
use crate::error::{Error, Result};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::TspConfig;
///
/// let config = TspConfig::default();
/// assert_eq!(config.city_count, 5);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.elite_count(), 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::TspConfig;
///
/// let config = TspConfig::new(40)
///     .with_population_size(200)
///     .with_mutation_rate(0.2)
///     .with_crossover_rate(0.9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// Setters store values as given; out-of-range values are reported by
/// [`validate`](TspConfig::validate), never clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspConfig {
    /// Number of cities, anchor included. Must match the coordinate list.
    pub city_count: usize,

    /// Number of tours per generation. Constant across generations.
    pub population_size: usize,

    /// Probability of a swap mutation per offspring (0.0–1.0).
    ///
    /// Segment reversal fires independently with half this probability.
    pub mutation_rate: f64,

    /// Probability of ordered crossover per offspring (0.0–1.0).
    ///
    /// When crossover is skipped the child is a copy of the first parent.
    pub crossover_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            city_count: 5,
            population_size: 50,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            seed: None,
        }
    }
}

impl TspConfig {
    /// Default parameters for `city_count` cities.
    pub fn new(city_count: usize) -> Self {
        Self {
            city_count,
            ..Self::default()
        }
    }

    /// Sets the city count.
    pub fn with_city_count(mut self, n: usize) -> Self {
        self.city_count = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tours carried unchanged into the next generation: `max(1, P / 20)`.
    pub fn elite_count(&self) -> usize {
        (self.population_size / 20).max(1)
    }

    /// Members drawn per tournament: `max(3, P / 50)`.
    pub fn tournament_size(&self) -> usize {
        tournament_size(self.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.city_count < 2 {
            return Err(Error::TooFewCities {
                count: self.city_count,
            });
        }
        if self.population_size < 2 {
            return Err(Error::PopulationTooSmall {
                size: self.population_size,
            });
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    // NaN fails the range check as well.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::RateOutOfRange { name, value })
    }
}
