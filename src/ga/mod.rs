//! Genetic Algorithm for the Euclidean TSP.
//!
//! Candidate solutions are [`Tour`]s: permutations of cities `1..n` with city
//! 0 as the fixed anchor. [`Engine`] evolves a constant-size [`Population`]
//! one generation at a time.
//!
//! # Key Types
//!
//! - [`TspConfig`]: Population size, operator rates, seed
//! - [`Engine`]: Runs generation steps and tracks the all-time best
//! - [`GenerationRecord`]: Immutable per-generation snapshot
//! - [`GenerationObserver`]: Callback, channel or latest-value sinks for records
//!
//! # Submodules
//!
//! - [`operators`]: Ordered crossover, swap and segment-reversal mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
mod engine;
mod fitness;
mod observer;
pub mod operators;
mod population;
mod record;
pub mod selection;
mod types;

pub use config::TspConfig;
pub use engine::{Engine, RunState, RECENT_COSTS_WINDOW};
pub use fitness::{circuit_length, FitnessEvaluator};
pub use observer::{GenerationObserver, LatestRecord};
pub use population::Population;
pub use record::{GenerationRecord, RunStatistics};
pub use types::{Individual, Tour, ANCHOR};
