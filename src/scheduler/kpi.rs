//! Assignment quality metrics (KPIs).
//!
//! Computes reporting indicators for a complete job-to-worker assignment
//! and compares makespans across methods.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest worker completion time |
//! | Worker makespan | Completion time of each worker |
//! | Utilization | Worker completion time / makespan |
//! | Avg Utilization | Mean over all workers, idle ones included |
//! | Workers Used | Workers with at least one job |
//!
//! Jobs on one worker may overlap, so summed job durations overstate how
//! long a worker is busy. Utilization is based on completion time instead.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Assignment;
use crate::problem::Problem;
use crate::simulator::worker_makespans;

/// Assignment performance indicators. Times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentKpi {
    /// Latest worker completion time.
    pub makespan: f64,
    /// Completion time per worker, in worker order.
    pub worker_makespans: Vec<f64>,
    /// Completion time / makespan per worker (0.0..=1.0).
    pub utilization: Vec<f64>,
    /// Mean of `utilization`.
    pub avg_utilization: f64,
    /// Workers with at least one job.
    pub workers_used: usize,
    /// Jobs per worker.
    pub jobs_per_worker: Vec<usize>,
}

impl AssignmentKpi {
    /// Simulates `assignment` and derives its KPIs.
    pub fn calculate(problem: &Problem, assignment: &Assignment) -> Result<Self> {
        let worker_makespans = worker_makespans(problem, assignment)?;
        let makespan = worker_makespans.iter().copied().fold(0.0, f64::max);

        let utilization: Vec<f64> = if makespan > 0.0 {
            worker_makespans.iter().map(|&m| m / makespan).collect()
        } else {
            vec![0.0; worker_makespans.len()]
        };
        let avg_utilization = if utilization.is_empty() {
            0.0
        } else {
            utilization.iter().sum::<f64>() / utilization.len() as f64
        };

        let jobs_per_worker: Vec<usize> = assignment
            .jobs_by_worker(problem.worker_count())
            .iter()
            .map(Vec::len)
            .collect();

        Ok(Self {
            makespan,
            worker_makespans,
            utilization,
            avg_utilization,
            workers_used: assignment.distinct_workers(),
            jobs_per_worker,
        })
    }

    /// Whether the makespan is within `max_makespan` and utilization reaches
    /// `min_utilization`.
    pub fn meets_thresholds(&self, max_makespan: f64, min_utilization: f64) -> bool {
        self.makespan <= max_makespan && self.avg_utilization >= min_utilization
    }
}

/// Makespan reduction of one method over another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// `baseline − improved` (seconds). Negative when `improved` is worse.
    pub seconds: f64,
    /// Reduction relative to the baseline, in percent. `None` for a zero
    /// baseline.
    pub percent: Option<f64>,
}

/// Compares `improved` against `baseline` makespan.
pub fn improvement(baseline: f64, improved: f64) -> Improvement {
    let seconds = baseline - improved;
    let percent = if baseline == 0.0 {
        None
    } else {
        Some(seconds / baseline * 100.0)
    };
    Improvement { seconds, percent }
}
