//! Pheromone update rules.
//!
//! # Standard (Ant System)
//!
//! ```text
//! τ ← (1 − ρ) · τ                       for every cell
//! τ ← τ + Q / L · k                      for every cell on an ant's path
//! ```
//!
//! `L` is the simulated makespan of the ant's path and `k` the number of
//! distinct workers it uses, so paths that spread load are reinforced more.
//!
//! # Elitist Min–Max (MMAS)
//!
//! Same deposits, with every cell clamped into `[τ_min, τ_max]` after
//! evaporation and again after each deposit:
//!
//! ```text
//! τ_max = 1 / (ρ · L_best)
//! τ_min = τ_max · (1 − p^(1/n)) / ((n/2 − 1) · p^(1/n))
//! ```
//!
//! with `n` the number of decisions (jobs) and `p` = `p_best`. Bounds are
//! recomputed when a strictly better global best appears; existing values
//! are only pulled into the new interval by the per-cell clamps.
//!
//! # Reference
//! Stützle & Hoos (2000), "MAX–MIN Ant System"

use serde::{Deserialize, Serialize};

use crate::config::{AcoConfig, UpdateStrategy};
use crate::error::{AcoError, Result};
use crate::models::Assignment;
use crate::pheromone::PheromoneField;
use crate::problem::Problem;
use crate::simulator::assignment_makespan;

/// Clamp interval for min–max pheromone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TauBounds {
    /// Lower bound (τ_min).
    pub min: f64,
    /// Upper bound (τ_max).
    pub max: f64,
}

impl TauBounds {
    /// Derives bounds from the best makespan found so far.
    ///
    /// Fails when `best_length` is not positive, when `decisions <= 2`
    /// (the `n/2 − 1` term vanishes or goes negative) or when the
    /// resulting interval is empty or not finite.
    pub fn from_best(evaporation: f64, best_length: f64, decisions: usize, p_best: f64) -> Result<Self> {
        if !(best_length > 0.0 && best_length.is_finite()) {
            return Err(AcoError::config(format!(
                "min-max bounds need a positive best makespan, got {best_length}"
            )));
        }
        if decisions <= 2 {
            return Err(AcoError::config(format!(
                "min-max bounds need more than 2 jobs, got {decisions}"
            )));
        }

        let n = decisions as f64;
        let max = 1.0 / (evaporation * best_length);
        let root = p_best.powf(1.0 / n);
        let min = max * (1.0 - root) / ((n / 2.0 - 1.0) * root);

        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(AcoError::config(format!(
                "degenerate pheromone bounds [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Whether `tau` lies inside the interval.
    pub fn contains(&self, tau: f64) -> bool {
        self.min <= tau && tau <= self.max
    }
}

/// An ant's path with its simulated cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPath {
    /// The path.
    pub path: Assignment,
    /// Makespan of the path (seconds).
    pub makespan: f64,
    /// Distinct workers used.
    pub workers_used: usize,
}

impl ScoredPath {
    /// Simulates `path` to obtain its cost.
    pub fn score(problem: &Problem, path: Assignment) -> Result<Self> {
        let makespan = assignment_makespan(problem, &path)?;
        let workers_used = path.distinct_workers();
        Ok(Self {
            path,
            makespan,
            workers_used,
        })
    }

    /// Pheromone this path deposits: `Q / L · k`.
    pub fn deposit(&self, q: f64) -> Result<f64> {
        deposit_amount(q, self.makespan, self.workers_used)
    }
}

/// `Q / makespan · workers_used`.
pub fn deposit_amount(q: f64, makespan: f64, workers_used: usize) -> Result<f64> {
    if !(makespan > 0.0) {
        return Err(AcoError::config(format!(
            "cannot deposit for a path with makespan {makespan}"
        )));
    }
    Ok(q / makespan * workers_used as f64)
}

/// Scores every ant path.
pub fn score_paths(problem: &Problem, paths: Vec<Assignment>) -> Result<Vec<ScoredPath>> {
    paths
        .into_iter()
        .map(|path| ScoredPath::score(problem, path))
        .collect()
}

/// The global-best path, reinforced on top of the regular deposits.
#[derive(Debug, Clone, Copy)]
pub struct EliteDeposit<'a> {
    /// Best path so far.
    pub path: &'a Assignment,
    /// Its makespan.
    pub makespan: f64,
    /// Multiple of a regular deposit.
    pub weight: f64,
}

impl EliteDeposit<'_> {
    fn amount(&self, q: f64) -> Result<f64> {
        Ok(self.weight * deposit_amount(q, self.makespan, self.path.distinct_workers())?)
    }
}

/// Evaporates every cell, then deposits along each scored path.
pub fn standard_update(
    field: &mut PheromoneField,
    scored: &[ScoredPath],
    evaporation: f64,
    q: f64,
    elite: Option<EliteDeposit<'_>>,
) -> Result<()> {
    field.evaporate(evaporation);

    for ant in scored {
        let delta = ant.deposit(q)?;
        for (job, worker) in ant.path.pairs() {
            field.deposit(job, worker, delta);
        }
    }

    if let Some(elite) = elite {
        let delta = elite.amount(q)?;
        for (job, worker) in elite.path.pairs() {
            field.deposit(job, worker, delta);
        }
    }
    Ok(())
}

/// Evaporates and clamps every cell, then deposits along each scored path,
/// clamping after every addition.
pub fn min_max_update(
    field: &mut PheromoneField,
    scored: &[ScoredPath],
    evaporation: f64,
    q: f64,
    bounds: TauBounds,
    elite: Option<EliteDeposit<'_>>,
) -> Result<()> {
    field.evaporate(evaporation);
    field.clamp_all(bounds.min, bounds.max);

    for ant in scored {
        let delta = ant.deposit(q)?;
        for (job, worker) in ant.path.pairs() {
            field.deposit_clamped(job, worker, delta, bounds.min, bounds.max);
        }
    }

    if let Some(elite) = elite {
        let delta = elite.amount(q)?;
        for (job, worker) in elite.path.pairs() {
            field.deposit_clamped(job, worker, delta, bounds.min, bounds.max);
        }
    }
    Ok(())
}

/// Applies the configured update rule and tracks min–max bounds.
#[derive(Debug, Clone)]
pub struct PheromoneUpdater {
    strategy: UpdateStrategy,
    evaporation: f64,
    q: f64,
    elitist_weight: f64,
    decisions: usize,
    bounds: Option<TauBounds>,
}

impl PheromoneUpdater {
    /// Creates an updater for a problem with `decisions` jobs.
    ///
    /// Min–max bounds stay unset until the first [`observe_best`](Self::observe_best).
    pub fn new(config: &AcoConfig, decisions: usize) -> Self {
        Self {
            strategy: config.strategy,
            evaporation: config.evaporation,
            q: config.q,
            elitist_weight: config.elitist_weight,
            decisions,
            bounds: None,
        }
    }

    /// Current min–max bounds, if any.
    pub fn bounds(&self) -> Option<TauBounds> {
        self.bounds
    }

    /// Records a new global-best makespan; recomputes min–max bounds.
    pub fn observe_best(&mut self, best_makespan: f64) -> Result<()> {
        if let UpdateStrategy::ElitistMinMax { p_best } = self.strategy {
            let bounds = TauBounds::from_best(self.evaporation, best_makespan, self.decisions, p_best)?;
            tracing::debug!(
                tau_min = bounds.min,
                tau_max = bounds.max,
                best_makespan,
                "pheromone bounds recomputed"
            );
            self.bounds = Some(bounds);
        }
        Ok(())
    }

    /// Scores `paths` and updates `field` in place.
    ///
    /// `best` is the global-best path and makespan; it is reinforced only
    /// when the elitist weight is positive.
    pub fn apply(
        &self,
        problem: &Problem,
        field: &mut PheromoneField,
        paths: Vec<Assignment>,
        best: Option<(&Assignment, f64)>,
    ) -> Result<()> {
        let scored = score_paths(problem, paths)?;
        let elite = best
            .filter(|_| self.elitist_weight > 0.0)
            .map(|(path, makespan)| EliteDeposit {
                path,
                makespan,
                weight: self.elitist_weight,
            });

        match self.strategy {
            UpdateStrategy::Standard => {
                standard_update(field, &scored, self.evaporation, self.q, elite)?
            }
            UpdateStrategy::ElitistMinMax { .. } => {
                let bounds = self.bounds.ok_or_else(|| {
                    AcoError::config("min-max update before any best makespan was observed")
                })?;
                min_max_update(field, &scored, self.evaporation, self.q, bounds, elite)?
            }
        }

        let (lo, hi) = field.range();
        tracing::debug!(ants = scored.len(), tau_min = lo, tau_max = hi, "pheromone updated");
        Ok(())
    }
}
