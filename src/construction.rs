//! Probabilistic path construction.
//!
//! Each ant picks one worker per job by roulette-wheel selection over
//!
//! ```text
//! desirability(j, w) = τ(j, w)^α · (1 / d(j, w))^β
//! ```
//!
//! normalised per job. The field is read-only during construction, so the
//! per-job distributions are computed once per iteration and shared by all
//! ants.
//!
//! # Reproducibility
//! Every ant gets its own [`SmallRng`] seeded from the caller's RNG before
//! any path is built. The paths are therefore identical whether ants run
//! sequentially or on the rayon pool.
//!
//! # Reference
//! Dorigo & Stützle (2004), "Ant Colony Optimization", Ch. 3.3

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{AcoError, Result};
use crate::models::Assignment;
use crate::pheromone::PheromoneField;

/// Selection probabilities for `job` over all workers, in worker order.
///
/// Fails if a duration is not strictly positive or if the desirabilities
/// do not sum to a positive finite value.
pub fn probabilities(field: &PheromoneField, job: usize, alpha: f64, beta: f64) -> Result<Vec<f64>> {
    let mut desirability = Vec::with_capacity(field.worker_count());
    for (w, (&tau, &duration)) in field
        .row(job)
        .iter()
        .zip(field.duration_row(job))
        .enumerate()
    {
        if !(duration > 0.0) {
            return Err(AcoError::config(format!(
                "duration of job {job} on worker {w} must be positive, got {duration}"
            )));
        }
        desirability.push(tau.powf(alpha) * (1.0 / duration).powf(beta));
    }

    let total: f64 = desirability.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(AcoError::config(format!(
            "total desirability for job {job} is {total}"
        )));
    }

    Ok(desirability.into_iter().map(|d| d / total).collect())
}

/// Roulette-wheel pick: the first worker whose cumulative probability
/// exceeds `r`. Falls back to the last worker when rounding leaves the
/// cumulative sum just under `r`.
pub fn pick_worker(r: f64, probabilities: &[f64]) -> usize {
    let mut cumulative = 0.0;
    for (w, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return w;
        }
    }
    probabilities.len().saturating_sub(1)
}

/// Per-job selection distributions for one iteration.
#[derive(Debug, Clone)]
pub struct SelectionTable {
    rows: Vec<Vec<f64>>,
}

impl SelectionTable {
    /// Computes the distribution of every job from the current field.
    pub fn from_field(field: &PheromoneField, alpha: f64, beta: f64) -> Result<Self> {
        let rows = (0..field.job_count())
            .map(|job| probabilities(field, job, alpha, beta))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Probabilities for one job.
    pub fn row(&self, job: usize) -> &[f64] {
        &self.rows[job]
    }

    /// Builds one ant's path.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Assignment {
        let workers = self
            .rows
            .iter()
            .map(|row| pick_worker(rng.random::<f64>(), row))
            .collect();
        Assignment::new(workers)
    }
}

/// Builds `ants` independent paths from the current field.
///
/// With `parallel` set, ants are sampled on the rayon thread pool.
pub fn build_paths<R: Rng>(
    field: &PheromoneField,
    ants: usize,
    alpha: f64,
    beta: f64,
    parallel: bool,
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    let table = SelectionTable::from_field(field, alpha, beta)?;
    let seeds: Vec<u64> = (0..ants).map(|_| rng.random()).collect();

    let paths: Vec<Assignment> = if parallel {
        seeds
            .par_iter()
            .map(|&seed| table.sample(&mut SmallRng::seed_from_u64(seed)))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| table.sample(&mut SmallRng::seed_from_u64(seed)))
            .collect()
    };
    Ok(paths)
}
