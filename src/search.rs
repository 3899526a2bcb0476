//! ACO search loop.
//!
//! # Algorithm
//!
//! ```text
//! field ← τ₀ everywhere
//! best  ← evaluate(field)
//! loop:
//!     paths ← construct `ants` paths from field     (read-only)
//!     update field from paths and their makespans   (mutable)
//!     current ← evaluate(field)
//!     stall ← |previous − current| < tol ? stall + 1 : 0
//!     stop when stall = patience or iteration = max_iterations
//! ```
//!
//! The returned result is the best evaluation seen, not the last one.
//! Running out of iterations is reported through [`Termination`], not as an
//! error.
//!
//! # Reference
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//! Colony of Cooperating Agents"

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::AcoConfig;
use crate::construction::build_paths;
use crate::error::Result;
use crate::evaluate::evaluate;
use crate::models::Assignment;
use crate::pheromone::PheromoneField;
use crate::problem::Problem;
use crate::update::{PheromoneUpdater, TauBounds};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The evaluated makespan stayed within tolerance for `patience`
    /// consecutive iterations.
    Converged,
    /// The iteration cap was reached first.
    MaxIterations,
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best assignment evaluated.
    pub best_assignment: Assignment,
    /// Its makespan (seconds).
    pub best_makespan: f64,
    /// Evaluated makespan after each iteration.
    pub history: Vec<f64>,
    /// Iterations run.
    pub iterations: usize,
    /// Stop reason.
    pub termination: Termination,
    /// Seed the run used (drawn fresh when the config had none).
    pub seed: u64,
}

impl SearchResult {
    /// Whether the search stopped on the convergence test.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// State after one iteration, handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct IterationEvent<'a> {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Makespan of this iteration's evaluation.
    pub makespan: f64,
    /// Best makespan so far.
    pub best_makespan: f64,
    /// Assignment this iteration's evaluation picked.
    pub assignment: &'a Assignment,
    /// Pheromone field after the update.
    pub field: &'a PheromoneField,
    /// Min–max bounds the update clamped to; `None` for the standard rule.
    pub bounds: Option<TauBounds>,
}

/// Receives every iteration of a search.
pub trait SearchObserver {
    /// Called after each iteration's evaluation.
    fn on_iteration(&mut self, event: &IterationEvent<'_>);
}

impl SearchObserver for () {
    fn on_iteration(&mut self, _event: &IterationEvent<'_>) {}
}

/// Records per-iteration makespans and, optionally, pheromone snapshots.
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    /// Evaluated makespan per iteration.
    pub makespans: Vec<f64>,
    /// Best makespan so far, per iteration.
    pub best_makespans: Vec<f64>,
    /// Pheromone values per iteration (row-major), if enabled.
    pub snapshots: Option<Vec<Vec<f64>>>,
}

impl HistoryRecorder {
    /// Creates a recorder that keeps makespans only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keeps a copy of the field after every iteration.
    pub fn with_snapshots(mut self) -> Self {
        self.snapshots = Some(Vec::new());
        self
    }
}

impl SearchObserver for HistoryRecorder {
    fn on_iteration(&mut self, event: &IterationEvent<'_>) {
        self.makespans.push(event.makespan);
        self.best_makespans.push(event.best_makespan);
        if let Some(snapshots) = &mut self.snapshots {
            snapshots.push(event.field.values().to_vec());
        }
    }
}

/// Runs an ACO search on `problem`.
pub fn run_search(problem: &Problem, config: &AcoConfig) -> Result<SearchResult> {
    run_search_with_observer(problem, config, &mut ())
}

/// Runs an ACO search, reporting every iteration to `observer`.
pub fn run_search_with_observer<O: SearchObserver>(
    problem: &Problem,
    config: &AcoConfig,
    observer: &mut O,
) -> Result<SearchResult> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);

    tracing::info!(
        jobs = problem.job_count(),
        workers = problem.worker_count(),
        ants = config.ants,
        strategy = ?config.strategy,
        seed,
        "ACO search started"
    );

    let mut field = PheromoneField::new(problem, config.initial_pheromone)?;
    let mut updater = PheromoneUpdater::new(config, problem.job_count());

    let initial = evaluate(problem, &field)?;
    let mut best_assignment = initial.assignment;
    let mut best_makespan = initial.makespan;
    updater.observe_best(best_makespan)?;

    let mut history = Vec::with_capacity(config.max_iterations);
    let mut previous = f64::INFINITY;
    let mut stall = 0;
    let mut termination = Termination::MaxIterations;

    for iteration in 1..=config.max_iterations {
        let paths = build_paths(
            &field,
            config.ants,
            config.alpha,
            config.beta,
            config.parallel,
            &mut rng,
        )?;
        let bounds = updater.bounds();
        updater.apply(problem, &mut field, paths, Some((&best_assignment, best_makespan)))?;

        let current = evaluate(problem, &field)?;
        if current.makespan < best_makespan {
            best_makespan = current.makespan;
            best_assignment = current.assignment.clone();
            updater.observe_best(best_makespan)?;
        }
        history.push(current.makespan);

        observer.on_iteration(&IterationEvent {
            iteration,
            makespan: current.makespan,
            best_makespan,
            assignment: &current.assignment,
            field: &field,
            bounds,
        });

        if (previous - current.makespan).abs() < config.tolerance {
            stall += 1;
        } else {
            stall = 0;
        }
        previous = current.makespan;

        tracing::debug!(iteration, makespan = current.makespan, best_makespan, stall, "iteration");

        if stall >= config.patience {
            termination = Termination::Converged;
            break;
        }
    }

    let iterations = history.len();
    match termination {
        Termination::Converged => {
            tracing::info!(iterations, best_makespan, "ACO search converged")
        }
        Termination::MaxIterations => tracing::warn!(
            iterations,
            best_makespan,
            "ACO search stopped at max_iterations without converging"
        ),
    }

    Ok(SearchResult {
        best_assignment,
        best_makespan,
        history,
        iterations,
        termination,
        seed,
    })
}
