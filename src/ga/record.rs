//! Per-generation snapshots and run statistics.

use super::types::Tour;
use std::time::Duration;

/// Snapshot emitted after every generation step.
///
/// A record owns copies of its tours and is never mutated after emission, so
/// it can be handed to any thread without synchronization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord {
    /// Zero-based index of the generation that produced this record.
    pub generation: u64,

    /// Cost of the cheapest tour in this generation.
    pub best_cost: f64,

    /// The cheapest tour in this generation.
    pub generation_best: Tour,

    /// Cheapest cost seen since initialization.
    pub all_time_best_cost: f64,

    /// Cheapest tour seen since initialization.
    pub all_time_best: Tour,

    /// Whether this generation set a new all-time best.
    pub improved: bool,

    /// Number of generations that set a new all-time best so far.
    pub improvements: u64,

    /// Consecutive generations without a new all-time best.
    ///
    /// The engine never stops on its own; drivers that want a stopping
    /// policy inspect this counter.
    pub generations_since_improvement: u64,

    /// Wall-clock time of the step.
    pub elapsed: Duration,
}

impl GenerationRecord {
    /// Throughput implied by this step's duration.
    pub fn generations_per_second(&self) -> Option<f64> {
        per_second(self.elapsed)
    }
}

/// Aggregate statistics since the last initialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStatistics {
    /// Generations completed.
    pub generations: u64,

    /// The first all-time best, recorded at the first generation.
    pub initial_best_cost: Option<f64>,

    /// Current all-time best cost.
    pub best_cost: Option<f64>,

    pub improvements: u64,

    pub generations_since_improvement: u64,

    /// Generation-best costs of the most recent generations, oldest first.
    pub recent_costs: Vec<f64>,

    /// Duration of the last step.
    pub last_elapsed: Option<Duration>,
}

impl RunStatistics {
    /// Relative improvement over the first generation, in percent.
    ///
    /// `None` before the first generation or when the initial cost is zero.
    pub fn improvement_percent(&self) -> Option<f64> {
        let initial = self.initial_best_cost?;
        let best = self.best_cost?;
        if initial == 0.0 {
            return None;
        }
        Some(100.0 * (initial - best) / initial)
    }

    /// Throughput implied by the last step's duration.
    pub fn generations_per_second(&self) -> Option<f64> {
        per_second(self.last_elapsed?)
    }
}

fn per_second(elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| 1.0 / secs)
}
