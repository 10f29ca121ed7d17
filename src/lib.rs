//! Generational genetic algorithm for the Euclidean Traveling Salesman Problem.
//!
//! Given city coordinates, the engine evolves a population of tours toward a
//! short closed circuit that visits every city exactly once:
//!
//! - **Representation**: tours are permutations of cities `1..n`; city 0 is
//!   the implicit start and end.
//! - **Fitness**: closed-circuit Euclidean length (lower is better).
//! - **Operators**: tournament selection, ordered crossover (OX), swap and
//!   segment-reversal mutation, elitism.
//! - **Observation**: every generation yields an owned
//!   [`GenerationRecord`](ga::GenerationRecord) delivered to subscribed
//!   observers (callbacks, channels, latest-value slots).
//!
//! # Architecture
//!
//! The engine performs no scheduling of its own. A driver calls
//! [`Engine::step`](ga::Engine::step) (or [`tick`](ga::Engine::tick) while
//! running) as often as it likes and decides when to stop, typically from
//! the generations-since-improvement counter. All randomness comes from an
//! injected [`rand::Rng`], so seeded runs are reproducible.

mod error;
pub mod ga;
pub mod problem;
pub mod random;

pub use error::{Error, Result};
