//! Hyper-parameter tuning drivers.
//!
//! ACO quality depends heavily on τ₀, ant count, α, β, ρ and Q. This module
//! wraps [`run_search`] in the usual sweeps:
//!
//! - [`repeat_search`]: independent runs of one configuration, best and mean.
//! - [`grid_search`]: every combination of a [`ParameterGrid`].
//! - [`random_search`]: uniform samples from [`ParameterRanges`].
//! - [`deep_random_search`]: random search that repeatedly narrows the
//!   ranges around the best trial.
//!
//! Trials run on the rayon pool. Every trial's seed is fixed before any
//! trial starts, so results only depend on the caller's RNG.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AcoConfig;
use crate::error::{AcoError, Result};
use crate::models::Assignment;
use crate::problem::Problem;
use crate::search::run_search;

/// The tunable subset of [`AcoConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub initial_pheromone: f64,
    pub ants: usize,
    pub alpha: f64,
    pub beta: f64,
    pub evaporation: f64,
    pub q: f64,
}

impl ParameterSet {
    /// Reads the tunable fields of `config`.
    pub fn from_config(config: &AcoConfig) -> Self {
        Self {
            initial_pheromone: config.initial_pheromone,
            ants: config.ants,
            alpha: config.alpha,
            beta: config.beta,
            evaporation: config.evaporation,
            q: config.q,
        }
    }

    /// `base` with these parameters substituted.
    pub fn apply(&self, base: &AcoConfig) -> AcoConfig {
        base.clone()
            .with_initial_pheromone(self.initial_pheromone)
            .with_ants(self.ants)
            .with_alpha(self.alpha)
            .with_beta(self.beta)
            .with_evaporation(self.evaporation)
            .with_q(self.q)
    }
}

/// Best and mean makespan over independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatSummary {
    /// Assignment of the best run.
    pub best_assignment: Assignment,
    /// Lowest makespan across runs.
    pub best_makespan: f64,
    /// Mean makespan across runs.
    pub mean_makespan: f64,
    /// Best makespan of each run, in run order.
    pub makespans: Vec<f64>,
}

/// One evaluated parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningResult {
    pub parameters: ParameterSet,
    pub best_makespan: f64,
    pub mean_makespan: f64,
    pub best_assignment: Assignment,
}

impl TuningResult {
    fn new(parameters: ParameterSet, summary: RepeatSummary) -> Self {
        Self {
            parameters,
            best_makespan: summary.best_makespan,
            mean_makespan: summary.mean_makespan,
            best_assignment: summary.best_assignment,
        }
    }
}

/// Runs `config` `runs` times and keeps the best assignment.
///
/// A seeded config uses `seed, seed + 1, ...` for its runs; an unseeded
/// one draws a fresh seed per run.
pub fn repeat_search(problem: &Problem, config: &AcoConfig, runs: usize) -> Result<RepeatSummary> {
    if runs == 0 {
        return Err(AcoError::config("runs must be at least 1"));
    }

    let mut best: Option<(Assignment, f64)> = None;
    let mut makespans = Vec::with_capacity(runs);

    for run in 0..runs {
        let mut run_config = config.clone();
        run_config.seed = config.seed.map(|s| s.wrapping_add(run as u64));

        let result = run_search(problem, &run_config)?;
        makespans.push(result.best_makespan);
        if best.as_ref().is_none_or(|(_, m)| result.best_makespan < *m) {
            best = Some((result.best_assignment, result.best_makespan));
        }
    }

    let mean_makespan = makespans.iter().sum::<f64>() / runs as f64;
    let (best_assignment, best_makespan) = best.unwrap_or_default();
    Ok(RepeatSummary {
        best_assignment,
        best_makespan,
        mean_makespan,
        makespans,
    })
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Candidate values for an exhaustive sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGrid {
    pub initial_pheromone: Vec<f64>,
    pub ants: Vec<usize>,
    pub alpha: Vec<f64>,
    pub beta: Vec<f64>,
    pub evaporation: Vec<f64>,
    pub q: Vec<f64>,
}

impl ParameterGrid {
    /// Default grid for `n` jobs: τ₀ 0.1–1, ants n–2n, α 0.5–5, β 1–10,
    /// ρ 0.1–0.9, Q = n.
    pub fn for_job_count(n: usize) -> Self {
        let n_f = n as f64;
        let mut ants: Vec<usize> = linspace(n_f, 2.0 * n_f, 10)
            .into_iter()
            .map(|a| (a as usize).max(1))
            .collect();
        ants.dedup();
        Self {
            initial_pheromone: linspace(0.1, 1.0, 5),
            ants,
            alpha: linspace(0.5, 5.0, 5),
            beta: linspace(1.0, 10.0, 5),
            evaporation: linspace(0.1, 0.9, 5),
            q: vec![n_f.max(1.0)],
        }
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.initial_pheromone.len()
            * self.ants.len()
            * self.alpha.len()
            * self.beta.len()
            * self.evaporation.len()
            * self.q.len()
    }

    /// Whether the grid has no combinations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every combination, τ₀ varying slowest and Q fastest.
    pub fn combinations(&self) -> Vec<ParameterSet> {
        let mut out = Vec::with_capacity(self.len());
        for &initial_pheromone in &self.initial_pheromone {
            for &ants in &self.ants {
                for &alpha in &self.alpha {
                    for &beta in &self.beta {
                        for &evaporation in &self.evaporation {
                            for &q in &self.q {
                                out.push(ParameterSet {
                                    initial_pheromone,
                                    ants,
                                    alpha,
                                    beta,
                                    evaporation,
                                    q,
                                });
                            }
                        }
                    }
                }
            }
        }
        out
    }
}

fn sort_results(results: &mut [TuningResult]) {
    results.sort_by(|a, b| a.best_makespan.total_cmp(&b.best_makespan));
}

/// Runs `base` once per grid combination; results sorted by makespan.
pub fn grid_search(problem: &Problem, base: &AcoConfig, grid: &ParameterGrid) -> Result<Vec<TuningResult>> {
    tracing::info!(combinations = grid.len(), "grid search started");

    let mut results = grid
        .combinations()
        .into_par_iter()
        .map(|params| {
            let summary = repeat_search(problem, &params.apply(base), 1)?;
            Ok(TuningResult::new(params, summary))
        })
        .collect::<Result<Vec<_>>>()?;
    sort_results(&mut results);

    if let Some(best) = results.first() {
        tracing::info!(best_makespan = best.best_makespan, params = ?best.parameters, "grid search finished");
    }
    Ok(results)
}

/// Closed sampling intervals for random search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRanges {
    pub initial_pheromone: (f64, f64),
    pub ants: (usize, usize),
    pub alpha: (f64, f64),
    pub beta: (f64, f64),
    pub evaporation: (f64, f64),
    pub q: (f64, f64),
}

fn uniform<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}

fn narrow(best: f64, (lo, hi): (f64, f64)) -> (f64, f64) {
    let quarter = (hi - lo) / 4.0;
    ((best - quarter).max(lo), (best + quarter).min(hi))
}

impl ParameterRanges {
    /// Default ranges for `n` jobs: τ₀ 0.01–10, ants 3–2n, α 0.1–5,
    /// β 0.1–5, ρ 0.1–0.9, Q 0.1n–10n.
    pub fn for_job_count(n: usize) -> Self {
        let n_f = n.max(1) as f64;
        Self {
            initial_pheromone: (0.01, 10.0),
            ants: (3, (2 * n).max(3)),
            alpha: (0.1, 5.0),
            beta: (0.1, 5.0),
            evaporation: (0.1, 0.9),
            q: (0.1 * n_f, 10.0 * n_f),
        }
    }

    /// Rejects empty or inverted intervals and a zero ant count.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("initial_pheromone", self.initial_pheromone),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("evaporation", self.evaporation),
            ("q", self.q),
        ];
        for (name, (lo, hi)) in floats {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(AcoError::config(format!("invalid {name} range ({lo}, {hi})")));
            }
        }
        let (lo, hi) = self.ants;
        if lo == 0 || lo > hi {
            return Err(AcoError::config(format!("invalid ants range ({lo}, {hi})")));
        }
        Ok(())
    }

    /// Draws one parameter set uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParameterSet {
        ParameterSet {
            initial_pheromone: uniform(rng, self.initial_pheromone),
            ants: rng.random_range(self.ants.0..=self.ants.1),
            alpha: uniform(rng, self.alpha),
            beta: uniform(rng, self.beta),
            evaporation: uniform(rng, self.evaporation),
            q: uniform(rng, self.q),
        }
    }

    /// Width of every interval, ants included.
    pub fn widths(&self) -> [f64; 6] {
        [
            self.initial_pheromone.1 - self.initial_pheromone.0,
            (self.ants.1 - self.ants.0) as f64,
            self.alpha.1 - self.alpha.0,
            self.beta.1 - self.beta.0,
            self.evaporation.1 - self.evaporation.0,
            self.q.1 - self.q.0,
        ]
    }

    /// Ranges centred on `best`, each a quarter of the current width to
    /// either side, clamped to the current interval.
    ///
    /// Ant bounds are truncated to integers; if they meet, they are pushed
    /// one apart where the current interval allows.
    pub fn narrow_around(&self, best: &ParameterSet) -> Self {
        let (lo, hi) = self.ants;
        let quarter = (hi - lo) as f64 / 4.0;
        let best_ants = best.ants as f64;
        let mut ants_lo = ((best_ants - quarter).trunc().max(lo as f64)) as usize;
        let mut ants_hi = ((best_ants + quarter).trunc().min(hi as f64)) as usize;
        if ants_lo == ants_hi {
            ants_lo = ants_lo.saturating_sub(1).max(lo);
            ants_hi = (ants_hi + 1).min(hi);
        }

        Self {
            initial_pheromone: narrow(best.initial_pheromone, self.initial_pheromone),
            ants: (ants_lo, ants_hi),
            alpha: narrow(best.alpha, self.alpha),
            beta: narrow(best.beta, self.beta),
            evaporation: narrow(best.evaporation, self.evaporation),
            q: narrow(best.q, self.q),
        }
    }
}

/// Evaluates `trials` random parameter sets, each with `runs_per_trial`
/// repeated runs. Results sorted by best makespan.
pub fn random_search<R: Rng>(
    problem: &Problem,
    base: &AcoConfig,
    ranges: &ParameterRanges,
    trials: usize,
    runs_per_trial: usize,
    rng: &mut R,
) -> Result<Vec<TuningResult>> {
    ranges.validate()?;
    if trials == 0 {
        return Err(AcoError::config("trials must be at least 1"));
    }

    let plan: Vec<(ParameterSet, u64)> = (0..trials)
        .map(|_| (ranges.sample(rng), rng.random()))
        .collect();

    let mut results = plan
        .into_par_iter()
        .map(|(params, seed)| {
            let config = params.apply(base).with_seed(seed);
            let summary = repeat_search(problem, &config, runs_per_trial)?;
            tracing::debug!(best_makespan = summary.best_makespan, params = ?params, "trial finished");
            Ok(TuningResult::new(params, summary))
        })
        .collect::<Result<Vec<_>>>()?;
    sort_results(&mut results);
    Ok(results)
}

/// Limits for [`deep_random_search`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepSearchOptions {
    /// Random trials per level.
    pub trials: usize,
    /// Repeated runs per trial.
    pub runs_per_trial: usize,
    /// Stop once every range is narrower than this.
    pub min_interval_width: f64,
    /// Stop after this many narrowing steps.
    pub max_depth: usize,
}

impl Default for DeepSearchOptions {
    fn default() -> Self {
        Self {
            trials: 100,
            runs_per_trial: 10,
            min_interval_width: 1e-2,
            max_depth: 10,
        }
    }
}

impl DeepSearchOptions {
    /// Sets trials per level.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets runs per trial.
    pub fn with_runs_per_trial(mut self, runs: usize) -> Self {
        self.runs_per_trial = runs;
        self
    }

    /// Sets the width stop threshold.
    pub fn with_min_interval_width(mut self, width: f64) -> Self {
        self.min_interval_width = width;
        self
    }

    /// Sets the depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Summary of one deep-search level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSummary {
    pub depth: usize,
    /// Ranges searched at this level.
    pub ranges: ParameterRanges,
    pub best_makespan: f64,
    /// Mean of the trials' best makespans.
    pub mean_makespan: f64,
    pub best_parameters: ParameterSet,
}

/// Outcome of [`deep_random_search`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSearchOutcome {
    /// Best trial of the final level.
    pub best: TuningResult,
    /// One entry per level, shallowest first.
    pub levels: Vec<DepthSummary>,
}

/// Random search that narrows its ranges around each level's best trial.
pub fn deep_random_search<R: Rng>(
    problem: &Problem,
    base: &AcoConfig,
    ranges: &ParameterRanges,
    options: &DeepSearchOptions,
    rng: &mut R,
) -> Result<DeepSearchOutcome> {
    let mut ranges = *ranges;
    let mut levels = Vec::new();
    let mut depth = 0;

    loop {
        let results = random_search(problem, base, &ranges, options.trials, options.runs_per_trial, rng)?;
        let mean_makespan =
            results.iter().map(|r| r.best_makespan).sum::<f64>() / results.len() as f64;
        let Some(best) = results.into_iter().next() else {
            return Err(AcoError::config("random search returned no trials"));
        };

        tracing::info!(
            depth,
            best_makespan = best.best_makespan,
            mean_makespan,
            params = ?best.parameters,
            "deep search level finished"
        );
        levels.push(DepthSummary {
            depth,
            ranges,
            best_makespan: best.best_makespan,
            mean_makespan,
            best_parameters: best.parameters,
        });

        if ranges.widths().iter().all(|&w| w < options.min_interval_width) {
            tracing::info!(depth, "deep search stopped: every range below minimum width");
            return Ok(DeepSearchOutcome { best, levels });
        }
        if depth >= options.max_depth {
            tracing::info!(depth, "deep search stopped: maximum depth reached");
            return Ok(DeepSearchOutcome { best, levels });
        }

        ranges = ranges.narrow_around(&best.parameters);
        tracing::debug!(?ranges, "ranges narrowed");
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Worker};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn problem() -> Problem {
        let jobs = (0..5)
            .map(|i| {
                let d = 4.0 + i as f64;
                Job::new(format!("J{i}")).with_durations(vec![d, d * 1.3, d * 0.9])
            })
            .collect();
        Problem::new(
            jobs,
            vec![Worker::new("A"), Worker::new("B"), Worker::new("C").with_cores(2)],
        )
        .unwrap()
    }

    fn base() -> AcoConfig {
        AcoConfig::default().with_max_iterations(8).with_seed(42)
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_parameter_set_apply() {
        let p = ParameterSet {
            initial_pheromone: 0.554,
            ants: 7,
            alpha: 1.182,
            beta: 0.497,
            evaporation: 0.892,
            q: 75.021,
        };
        let c = p.apply(&base());
        assert_eq!(ParameterSet::from_config(&c), p);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.max_iterations, 8);
    }

    #[test]
    fn test_repeat_search_summary() {
        let s = repeat_search(&problem(), &base(), 4).unwrap();
        assert_eq!(s.makespans.len(), 4);
        let min = s.makespans.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(s.best_makespan, min);
        assert!(s.mean_makespan >= s.best_makespan);
        assert_eq!(s.best_assignment.len(), 5);
    }

    #[test]
    fn test_repeat_search_reproducible() {
        let a = repeat_search(&problem(), &base(), 3).unwrap();
        let b = repeat_search(&problem(), &base(), 3).unwrap();
        assert_eq!(a, b);
        assert!(repeat_search(&problem(), &base(), 0).is_err());
    }

    #[test]
    fn test_grid_defaults() {
        let g = ParameterGrid::for_job_count(10);
        assert_eq!(g.initial_pheromone.len(), 5);
        assert_eq!(g.ants.first(), Some(&10));
        assert_eq!(g.ants.last(), Some(&20));
        assert_eq!(g.alpha, vec![0.5, 1.625, 2.75, 3.875, 5.0]);
        assert_eq!(g.q, vec![10.0]);
        assert_eq!(g.len(), g.combinations().len());
    }

    #[test]
    fn test_grid_search_sorted() {
        let grid = ParameterGrid {
            initial_pheromone: vec![0.1, 1.0],
            ants: vec![3, 6],
            alpha: vec![1.0],
            beta: vec![1.0, 3.0],
            evaporation: vec![0.5],
            q: vec![5.0],
        };
        let results = grid_search(&problem(), &base(), &grid).unwrap();
        assert_eq!(results.len(), 8);
        assert!(results
            .windows(2)
            .all(|w| w[0].best_makespan <= w[1].best_makespan));
    }

    #[test]
    fn test_random_ranges_defaults_and_sampling() {
        let r = ParameterRanges::for_job_count(6);
        assert_eq!(r.ants, (3, 12));
        assert!((r.q.0 - 0.6).abs() < 1e-12 && (r.q.1 - 60.0).abs() < 1e-12);
        assert!(r.validate().is_ok());

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let s = r.sample(&mut rng);
            assert!((3..=12).contains(&s.ants));
            assert!(s.alpha >= 0.1 && s.alpha <= 5.0);
            assert!(s.evaporation >= 0.1 && s.evaporation <= 0.9);
        }
    }

    #[test]
    fn test_ranges_validate() {
        let mut r = ParameterRanges::for_job_count(4);
        r.alpha = (2.0, 1.0);
        assert!(r.validate().is_err());
        let mut r = ParameterRanges::for_job_count(4);
        r.ants = (0, 4);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_narrow_around() {
        let r = ParameterRanges {
            initial_pheromone: (0.0, 8.0),
            ants: (3, 11),
            alpha: (0.0, 4.0),
            beta: (0.0, 4.0),
            evaporation: (0.1, 0.9),
            q: (0.0, 100.0),
        };
        let best = ParameterSet {
            initial_pheromone: 1.0,
            ants: 10,
            alpha: 2.0,
            beta: 4.0,
            evaporation: 0.5,
            q: 50.0,
        };
        let n = r.narrow_around(&best);
        assert_eq!(n.initial_pheromone, (0.0, 3.0));
        assert_eq!(n.ants, (8, 11));
        assert_eq!(n.alpha, (1.0, 3.0));
        assert_eq!(n.beta, (3.0, 4.0));
        assert!((n.evaporation.0 - 0.3).abs() < 1e-12 && (n.evaporation.1 - 0.7).abs() < 1e-12);
        assert_eq!(n.q, (25.0, 75.0));
    }

    #[test]
    fn test_narrow_ants_stays_at_least_one_wide() {
        let mut r = ParameterRanges::for_job_count(4);
        r.ants = (4, 6);
        let best = ParameterSet {
            ants: 5,
            ..ParameterSet::from_config(&base())
        };
        // quarter = 0.5: trunc(4.5), trunc(5.5)
        assert_eq!(r.narrow_around(&best).ants, (4, 5));

        r.ants = (5, 6);
        let best = ParameterSet { ants: 5, ..best };
        // quarter = 0.25: both bounds land on 5, widened within (5, 6)
        assert_eq!(r.narrow_around(&best).ants, (5, 6));
    }

    #[test]
    fn test_random_search_reproducible() {
        let ranges = ParameterRanges::for_job_count(5);
        let a = random_search(&problem(), &base(), &ranges, 6, 2, &mut SmallRng::seed_from_u64(1)).unwrap();
        let b = random_search(&problem(), &base(), &ranges, 6, 2, &mut SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
        assert!(a.windows(2).all(|w| w[0].best_makespan <= w[1].best_makespan));
    }

    #[test]
    fn test_deep_random_search_depth_limit() {
        let options = DeepSearchOptions::default()
            .with_trials(3)
            .with_runs_per_trial(1)
            .with_max_depth(2);
        let outcome = deep_random_search(
            &problem(),
            &base(),
            &ParameterRanges::for_job_count(5),
            &options,
            &mut SmallRng::seed_from_u64(7),
        )
        .unwrap();

        assert_eq!(outcome.levels.len(), 3);
        for (i, level) in outcome.levels.iter().enumerate() {
            assert_eq!(level.depth, i);
        }
        // Each level searches inside the previous one
        for w in outcome.levels.windows(2) {
            let (outer, inner) = (w[0].ranges, w[1].ranges);
            assert!(inner.alpha.0 >= outer.alpha.0 && inner.alpha.1 <= outer.alpha.1);
            assert!(inner.ants.0 >= outer.ants.0 && inner.ants.1 <= outer.ants.1);
        }
        assert_eq!(outcome.best.best_makespan, outcome.levels[2].best_makespan);
    }

    #[test]
    fn test_deep_random_search_width_stop() {
        let ranges = ParameterRanges {
            initial_pheromone: (0.5, 0.5),
            ants: (4, 4),
            alpha: (1.0, 1.0),
            beta: (1.0, 1.0),
            evaporation: (0.5, 0.5),
            q: (10.0, 10.0),
        };
        let options = DeepSearchOptions::default().with_trials(2).with_runs_per_trial(1);
        let outcome =
            deep_random_search(&problem(), &base(), &ranges, &options, &mut SmallRng::seed_from_u64(3))
                .unwrap();
        assert_eq!(outcome.levels.len(), 1);
        assert_eq!(outcome.best.parameters.ants, 4);
    }
}
