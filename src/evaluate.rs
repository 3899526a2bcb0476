//! Deterministic read-out of a pheromone field.
//!
//! Each job goes to the worker with the most pheromone on its row (first
//! worker wins ties). The resulting assignment is simulated to get its
//! makespan. No randomness is involved, so the same field always yields
//! the same evaluation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Assignment;
use crate::pheromone::PheromoneField;
use crate::problem::Problem;
use crate::simulator::worker_makespans;

/// Assignment preferred by a field, with its simulated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Strongest worker per job.
    pub assignment: Assignment,
    /// Maximum worker completion time (seconds).
    pub makespan: f64,
    /// Completion time per worker, in worker order (0 for idle workers).
    pub worker_makespans: Vec<f64>,
}

/// Picks the strongest worker for every job and simulates the result.
pub fn evaluate(problem: &Problem, field: &PheromoneField) -> Result<Evaluation> {
    let assignment = Assignment::new(
        (0..field.job_count())
            .map(|job| field.strongest_worker(job))
            .collect(),
    );
    let worker_makespans = worker_makespans(problem, &assignment)?;
    let makespan = worker_makespans.iter().copied().fold(0.0, f64::max);

    Ok(Evaluation {
        assignment,
        makespan,
        worker_makespans,
    })
}
