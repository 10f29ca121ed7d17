//! Generation-step execution.
//!
//! [`Engine`] owns the population and the all-time best tour and advances
//! them one generation per [`step`](Engine::step):
//! rank → record best → elitism → breed → replace → emit.
//!
//! A step is synchronous and takes `&mut self`, so two steps can never
//! overlap. Scheduling steps (timers, loops, threads) is left to the caller.

use super::config::TspConfig;
use super::fitness::FitnessEvaluator;
use super::observer::GenerationObserver;
use super::operators::{mutate, order_crossover};
use super::population::Population;
use super::record::{GenerationRecord, RunStatistics};
use super::selection::tournament;
use super::types::{Individual, Tour};
use crate::error::{Error, Result};
use crate::problem::{validate_cities, City};
use crate::random::create_rng_from;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Generation-best costs kept for [`RunStatistics::recent_costs`].
pub const RECENT_COSTS_WINDOW: usize = 20;

/// Whether [`Engine::tick`] advances the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Freshly initialized; no ticks issued yet.
    #[default]
    Idle,
    /// Each tick runs one generation.
    Running,
    /// Ticks are ignored; population and statistics are kept.
    Stopped,
}

/// Genetic algorithm engine for one TSP instance.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{Engine, TspConfig};
/// use u_tsp::problem::City;
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(0.0, 10.0),
/// ];
/// let config = TspConfig::new(cities.len()).with_seed(42);
/// let mut engine = Engine::new(config, cities)?;
///
/// for _ in 0..10 {
///     let record = engine.step();
///     assert!(record.all_time_best_cost <= record.best_cost);
/// }
/// # Ok::<(), u_tsp::Error>(())
/// ```
pub struct Engine<R: Rng = StdRng> {
    config: TspConfig,
    evaluator: FitnessEvaluator,
    population: Population,
    rng: R,
    state: RunState,

    generation: u64,
    best_tour: Option<Tour>,
    best_cost: f64,
    initial_best_cost: Option<f64>,
    improvements: u64,
    generations_since_improvement: u64,
    recent_costs: VecDeque<f64>,
    last_elapsed: Option<Duration>,

    observers: Vec<Box<dyn GenerationObserver + Send>>,
}

impl Engine<StdRng> {
    /// Creates an engine seeded from `config.seed` (or entropy when `None`).
    pub fn new(config: TspConfig, cities: Vec<City>) -> Result<Self> {
        let rng = create_rng_from(config.seed);
        Self::with_rng(config, cities, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an engine drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored; the supplied generator is the only source.
    pub fn with_rng(config: TspConfig, cities: Vec<City>, rng: R) -> Result<Self> {
        check_instance(&config, &cities)?;
        let mut engine = Self {
            evaluator: FitnessEvaluator::new(Vec::new()),
            population: Population::default(),
            config: config.clone(),
            rng,
            state: RunState::Idle,
            generation: 0,
            best_tour: None,
            best_cost: f64::INFINITY,
            initial_best_cost: None,
            improvements: 0,
            generations_since_improvement: 0,
            recent_costs: VecDeque::with_capacity(RECENT_COSTS_WINDOW),
            last_elapsed: None,
            observers: Vec::new(),
        };
        engine.reset(config, cities);
        Ok(engine)
    }

    /// Replaces configuration and cities and restarts from a random population.
    ///
    /// On error the engine is left untouched. Observers stay subscribed and
    /// the random generator continues its stream.
    #[instrument(
        level = "debug",
        skip_all,
        fields(cities = cities.len(), population = config.population_size)
    )]
    pub fn initialize(&mut self, config: TspConfig, cities: Vec<City>) -> Result<()> {
        check_instance(&config, &cities)?;
        self.reset(config, cities);
        Ok(())
    }

    /// Applies a new configuration to the current cities.
    ///
    /// Any accepted change reinitializes the run: the population is redrawn
    /// and all statistics reset. The city count must stay the same; use
    /// [`initialize`](Engine::initialize) to change cities.
    #[instrument(level = "debug", skip_all, fields(population = config.population_size))]
    pub fn reconfigure(&mut self, config: TspConfig) -> Result<()> {
        check_instance(&config, self.evaluator.cities())?;
        let cities = self.evaluator.cities().to_vec();
        self.reset(config, cities);
        Ok(())
    }

    fn reset(&mut self, config: TspConfig, cities: Vec<City>) {
        self.population =
            Population::random(config.population_size, config.city_count, &mut self.rng);
        self.evaluator = FitnessEvaluator::new(cities);
        self.config = config;
        self.state = RunState::Idle;
        self.generation = 0;
        self.best_tour = None;
        self.best_cost = f64::INFINITY;
        self.initial_best_cost = None;
        self.improvements = 0;
        self.generations_since_improvement = 0;
        self.recent_costs.clear();
        self.last_elapsed = None;

        tracing::debug!(
            cities = self.config.city_count,
            population = self.config.population_size,
            elites = self.config.elite_count(),
            tournament = self.config.tournament_size(),
            "population initialized"
        );
    }

    /// Subscribes an observer to every subsequent generation record.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: GenerationObserver + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Runs exactly one generation and returns its record.
    ///
    /// Observers receive the same record before this returns.
    pub fn step(&mut self) -> GenerationRecord {
        let started = Instant::now();
        let population_size = self.config.population_size;

        // 1. Rank the current population
        self.population.rank(&self.evaluator);

        // 2. Record this generation's best
        let leader = self
            .population
            .first()
            .expect("population must not be empty");
        let generation_best = leader.tour().clone();
        let best_cost = leader.cost();
        let generation = self.generation;
        self.generation += 1;

        // 3. Track the all-time best
        let improved = self.best_tour.is_none() || best_cost < self.best_cost;
        if improved {
            if self.initial_best_cost.is_none() {
                self.initial_best_cost = Some(best_cost);
            }
            self.best_cost = best_cost;
            self.best_tour = Some(generation_best.clone());
            self.generations_since_improvement = 0;
            self.improvements += 1;
            tracing::info!(generation, cost = best_cost, "new best tour");
        } else {
            self.generations_since_improvement += 1;
        }

        // 4. Elitism
        let elite_count = self.config.elite_count();
        let mut next = Population::with_capacity(population_size);
        for elite in &self.population.members()[..elite_count] {
            next.push(elite.clone());
        }

        // 5. Breed the remainder
        let members = self.population.members();
        let k = self.config.tournament_size();
        while next.len() < population_size {
            let p1 = tournament(members, k, &mut self.rng);
            let p2 = tournament(members, k, &mut self.rng);

            let genes = if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                order_crossover(
                    members[p1].tour().genes(),
                    members[p2].tour().genes(),
                    &mut self.rng,
                )
            } else {
                members[p1].tour().genes().to_vec()
            };

            let mut child = Tour::from_genes(genes);
            mutate(child.genes_mut(), self.config.mutation_rate, &mut self.rng);
            debug_assert!(
                child.validate(self.config.city_count).is_ok(),
                "operators produced a malformed tour: {child:?}"
            );
            next.push(Individual::new(child));
        }

        // 6. Replace
        self.population = next;

        let elapsed = started.elapsed();
        self.last_elapsed = Some(elapsed);
        if self.recent_costs.len() == RECENT_COSTS_WINDOW {
            self.recent_costs.pop_front();
        }
        self.recent_costs.push_back(best_cost);

        let record = GenerationRecord {
            generation,
            best_cost,
            generation_best,
            all_time_best_cost: self.best_cost,
            all_time_best: self
                .best_tour
                .clone()
                .expect("best tour is set by the first generation"),
            improved,
            improvements: self.improvements,
            generations_since_improvement: self.generations_since_improvement,
            elapsed,
        };

        tracing::debug!(
            generation,
            best_cost,
            all_time_best = self.best_cost,
            stagnant = self.generations_since_improvement,
            elapsed = ?elapsed,
            "generation complete"
        );

        // 7. Emit
        for observer in &mut self.observers {
            observer.on_generation(&record);
        }

        record
    }

    /// Moves to [`RunState::Running`].
    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    /// Moves to [`RunState::Stopped`], keeping all progress.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
        }
    }

    /// Runs one generation if the engine is running.
    pub fn tick(&mut self) -> Option<GenerationRecord> {
        match self.state {
            RunState::Running => Some(self.step()),
            RunState::Idle | RunState::Stopped => None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &TspConfig {
        &self.config
    }

    pub fn cities(&self) -> &[City] {
        self.evaluator.cities()
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// The population the next step will rank.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations completed since initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cheapest tour seen so far, `None` before the first step.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best_tour.as_ref()
    }

    /// Cheapest cost seen so far, `f64::INFINITY` before the first step.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    pub fn generations_since_improvement(&self) -> u64 {
        self.generations_since_improvement
    }

    pub fn statistics(&self) -> RunStatistics {
        RunStatistics {
            generations: self.generation,
            initial_best_cost: self.initial_best_cost,
            best_cost: self.best_tour.as_ref().map(|_| self.best_cost),
            improvements: self.improvements,
            generations_since_improvement: self.generations_since_improvement,
            recent_costs: self.recent_costs.iter().copied().collect(),
            last_elapsed: self.last_elapsed,
        }
    }
}

/// Validates a configuration against the coordinates it will run on.
fn check_instance(config: &TspConfig, cities: &[City]) -> Result<()> {
    config.validate()?;
    validate_cities(cities)?;
    if config.city_count != cities.len() {
        return Err(Error::CityCountMismatch {
            configured: config.city_count,
            supplied: cities.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::sync::mpsc;

    fn square_with_peak() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(10.0, 0.0),
            City::new(10.0, 10.0),
            City::new(0.0, 10.0),
            City::new(5.0, 20.0),
        ]
    }

    fn ring(n: usize) -> Vec<City> {
        (0..n)
            .map(|i| {
                let a = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                City::new(100.0 * a.cos(), 100.0 * a.sin())
            })
            .collect()
    }

    fn seeded(config: TspConfig, cities: Vec<City>, seed: u64) -> Engine {
        Engine::with_rng(config, cities, create_rng(seed)).expect("valid instance")
    }

    // ---- Construction and validation ----

    #[test]
    fn test_new_rejects_invalid_config() {
        let cities = square_with_peak();
        let config = TspConfig::new(5).with_population_size(1);
        assert!(matches!(
            Engine::new(config, cities),
            Err(Error::PopulationTooSmall { size: 1 })
        ));
    }

    #[test]
    fn test_new_rejects_single_city() {
        let config = TspConfig::new(1);
        assert!(matches!(
            Engine::new(config, vec![City::new(0.0, 0.0)]),
            Err(Error::TooFewCities { .. })
        ));
    }

    #[test]
    fn test_new_rejects_empty_city_list() {
        assert!(matches!(
            Engine::new(TspConfig::new(5), Vec::new()),
            Err(Error::TooFewCities { count: 0 })
        ));
    }

    #[test]
    fn test_new_rejects_overflowing_span() {
        let cities = vec![City::new(-1.5e308, 0.0), City::new(1.5e308, 0.0)];
        assert!(matches!(
            Engine::new(TspConfig::new(2), cities),
            Err(Error::CoordinateSpanTooLarge)
        ));
    }

    #[test]
    fn test_far_apart_cities_rank_by_finite_cost() {
        let cities = vec![
            City::new(-1e200, 0.0),
            City::new(1e200, 0.0),
            City::new(0.0, 1e200),
            City::new(1e200, 1e200),
        ];
        let mut engine = seeded(TspConfig::new(4), cities, 1);
        for _ in 0..5 {
            let record = engine.step();
            assert!(record.best_cost.is_finite());
            assert!(record.all_time_best_cost.is_finite());
        }
        let percent = engine.statistics().improvement_percent();
        assert!(percent.is_some_and(|p| p.is_finite() && p >= 0.0));
    }

    #[test]
    fn test_new_rejects_count_mismatch() {
        let result = Engine::new(TspConfig::new(4), square_with_peak());
        assert!(matches!(
            result,
            Err(Error::CityCountMismatch {
                configured: 4,
                supplied: 5
            })
        ));
    }

    #[test]
    fn test_initial_state() {
        let engine = seeded(TspConfig::default(), square_with_peak(), 1);
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.generation(), 0);
        assert!(engine.best_tour().is_none());
        assert!(engine.best_cost().is_infinite());
        assert_eq!(engine.population().len(), 50);
        assert!(engine.population().tours().all(|t| t.validate(5).is_ok()));
    }

    // ---- Generation step ----

    #[test]
    fn test_population_size_invariant() {
        let mut engine = seeded(TspConfig::new(12).with_population_size(37), ring(12), 5);
        assert_eq!(engine.population().len(), 37);
        for _ in 0..30 {
            engine.step();
            assert_eq!(engine.population().len(), 37);
            assert!(engine.population().tours().all(|t| t.validate(12).is_ok()));
        }
    }

    #[test]
    fn test_all_time_best_never_regresses() {
        let mut engine = seeded(TspConfig::new(15).with_population_size(60), ring(15), 9);
        let mut previous = f64::INFINITY;
        for _ in 0..100 {
            let record = engine.step();
            assert!(record.all_time_best_cost <= previous);
            assert!(record.all_time_best_cost <= record.best_cost);
            previous = record.all_time_best_cost;
        }
    }

    #[test]
    fn test_generation_indices_are_sequential() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 2);
        for expected in 0..5 {
            assert_eq!(engine.step().generation, expected);
        }
        assert_eq!(engine.generation(), 5);
    }

    #[test]
    fn test_first_step_is_an_improvement() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 3);
        let record = engine.step();
        assert!(record.improved);
        assert_eq!(record.improvements, 1);
        assert_eq!(record.generations_since_improvement, 0);
        assert_eq!(record.all_time_best, record.generation_best);
    }

    #[test]
    fn test_stagnation_counter() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 4);
        let mut last_improvement = 0;
        for _ in 0..50 {
            let record = engine.step();
            if record.improved {
                last_improvement = record.generation;
                assert_eq!(record.generations_since_improvement, 0);
            } else {
                assert_eq!(
                    record.generations_since_improvement,
                    record.generation - last_improvement
                );
            }
        }
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let config = TspConfig::new(15).with_population_size(50);
        let mut engine = seeded(config, ring(15), 11);
        engine.step();

        for _ in 0..10 {
            let mut ranked = engine.population().clone();
            ranked.rank(engine.evaluator());
            let elites: Vec<Tour> = ranked.tours().take(2).cloned().collect();

            let record = engine.step();
            assert_eq!(record.generation_best, elites[0]);
            let survivors: Vec<&Tour> = engine.population().tours().take(2).collect();
            assert_eq!(survivors, vec![&elites[0], &elites[1]]);
        }
    }

    #[test]
    fn test_beats_identity_baseline() {
        let cities = square_with_peak();
        let config = TspConfig::new(5)
            .with_population_size(50)
            .with_mutation_rate(0.1)
            .with_crossover_rate(0.8);
        let mut engine = seeded(config, cities, 42);
        for _ in 0..200 {
            engine.step();
        }
        let baseline = engine.evaluator().cost(&Tour::identity(5));
        assert!(
            engine.best_cost() <= baseline,
            "best {} worse than identity {baseline}",
            engine.best_cost()
        );
        let optimal = 30.0 + 2.0 * 125f64.sqrt();
        assert!((engine.best_cost() - optimal).abs() < 1e-9);
    }

    #[test]
    fn test_two_city_instance() {
        let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
        let mut engine = seeded(TspConfig::new(2).with_population_size(4), cities, 1);
        let record = engine.step();
        assert_eq!(record.generation_best.genes(), &[1]);
        assert!((record.best_cost - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rates_keep_tours_from_population() {
        let config = TspConfig::new(8)
            .with_population_size(20)
            .with_mutation_rate(0.0)
            .with_crossover_rate(0.0);
        let mut engine = seeded(config, ring(8), 21);
        let before: Vec<Tour> = engine.population().tours().cloned().collect();
        engine.step();
        assert!(engine.population().tours().all(|t| before.contains(t)));
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_records() {
        let run = |seed| {
            let mut engine = Engine::new(TspConfig::new(10).with_seed(seed), ring(10))
                .expect("valid instance");
            (0..25)
                .map(|_| GenerationRecord {
                    elapsed: Duration::ZERO,
                    ..engine.step()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
    }

    // ---- Reinitialization ----

    #[test]
    fn test_reconfigure_resets_run() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 6);
        engine.start();
        for _ in 0..5 {
            engine.step();
        }
        engine
            .reconfigure(TspConfig::default().with_population_size(80))
            .expect("valid config");
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.generation(), 0);
        assert!(engine.best_tour().is_none());
        assert_eq!(engine.population().len(), 80);
        assert_eq!(engine.statistics(), RunStatistics::default());
    }

    #[test]
    fn test_reconfigure_rejects_invalid_and_keeps_state() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 6);
        engine.step();
        let err = engine.reconfigure(TspConfig::default().with_crossover_rate(2.0));
        assert!(matches!(err, Err(Error::RateOutOfRange { .. })));
        assert_eq!(engine.generation(), 1);

        let err = engine.reconfigure(TspConfig::new(6));
        assert!(matches!(err, Err(Error::CityCountMismatch { .. })));
        assert_eq!(engine.population().len(), 50);
    }

    #[test]
    fn test_initialize_replaces_cities() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 8);
        engine.step();
        engine
            .initialize(TspConfig::new(9), ring(9))
            .expect("valid instance");
        assert_eq!(engine.cities().len(), 9);
        assert!(engine.population().tours().all(|t| t.validate(9).is_ok()));
        assert_eq!(engine.step().generation, 0);
    }

    // ---- Run state ----

    #[test]
    fn test_tick_only_while_running() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 10);
        assert!(engine.tick().is_none());

        engine.start();
        assert_eq!(engine.state(), RunState::Running);
        assert!(engine.tick().is_some());
        assert!(engine.tick().is_some());

        engine.stop();
        assert_eq!(engine.state(), RunState::Stopped);
        assert!(engine.tick().is_none());
        assert_eq!(engine.generation(), 2);

        engine.start();
        assert_eq!(engine.tick().map(|r| r.generation), Some(2));
    }

    #[test]
    fn test_stop_from_idle_stays_idle() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 10);
        engine.stop();
        assert_eq!(engine.state(), RunState::Idle);
    }

    // ---- Observers and statistics ----

    #[test]
    fn test_observers_receive_every_record() {
        let mut engine = seeded(TspConfig::default(), square_with_peak(), 12);
        let (tx, rx) = mpsc::channel::<GenerationRecord>();
        engine.subscribe(tx);

        let returned: Vec<GenerationRecord> = (0..5).map(|_| engine.step()).collect();
        let received: Vec<GenerationRecord> = rx.try_iter().collect();
        assert_eq!(received, returned);
    }

    #[test]
    fn test_records_can_cross_threads() {
        let mut engine = seeded(TspConfig::new(10), ring(10), 13);
        let (tx, rx) = mpsc::channel::<GenerationRecord>();
        engine.subscribe(tx);

        let consumer =
            std::thread::spawn(move || rx.iter().map(|r| r.generation).collect::<Vec<_>>());
        for _ in 0..10 {
            engine.step();
        }
        drop(engine);
        assert_eq!(consumer.join().ok(), Some((0..10).collect::<Vec<u64>>()));
    }

    #[test]
    fn test_statistics() {
        let mut engine = seeded(TspConfig::new(12), ring(12), 14);
        let first = engine.step();
        for _ in 0..(RECENT_COSTS_WINDOW + 5) {
            engine.step();
        }
        let stats = engine.statistics();
        assert_eq!(stats.generations, RECENT_COSTS_WINDOW as u64 + 6);
        assert_eq!(stats.initial_best_cost, Some(first.best_cost));
        assert_eq!(stats.best_cost, Some(engine.best_cost()));
        assert_eq!(stats.recent_costs.len(), RECENT_COSTS_WINDOW);
        assert!(stats.last_elapsed.is_some());
        assert!(stats.improvement_percent().unwrap_or(-1.0) >= 0.0);
    }
}
