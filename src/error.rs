//! Error types.
//!
//! Configuration and city-list problems surface from
//! [`Engine::new`](crate::ga::Engine::new),
//! [`Engine::initialize`](crate::ga::Engine::initialize) and
//! [`Engine::reconfigure`](crate::ga::Engine::reconfigure). A generation step
//! itself cannot fail.

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the TSP engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The population cannot hold two parents.
    #[error("population_size must be at least 2, got {size}")]
    PopulationTooSmall { size: usize },

    /// A probability parameter lies outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    /// Fewer than two cities: no tour can be formed.
    #[error("at least 2 cities are required, got {count}")]
    TooFewCities { count: usize },

    /// The configured city count disagrees with the supplied coordinates.
    #[error("configuration expects {configured} cities, {supplied} supplied")]
    CityCountMismatch { configured: usize, supplied: usize },

    /// A coordinate is NaN or infinite.
    #[error("city {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Coordinates are finite but spread so wide that a circuit length
    /// would overflow.
    #[error("city coordinates span too wide for a finite tour cost")]
    CoordinateSpanTooLarge,

    /// A tour is not a permutation of `1..city_count`.
    ///
    /// Only produced by [`Tour::validate`](crate::ga::Tour::validate); the
    /// genetic operators never create such a tour.
    #[error("malformed tour: {reason}")]
    MalformedTour { reason: String },
}
