//! Greedy list scheduler.
//!
//! # Algorithm
//!
//! 1. Order jobs (input order, or longest-first).
//! 2. For each job, try every worker that can handle it and simulate that
//!    worker's job set with the job added.
//! 3. Place the job on the worker with the smallest resulting completion
//!    time; the lowest worker index wins ties.
//!
//! A job no worker can handle fails with
//! [`AcoError::InfeasibleAssignment`] naming the job and the last worker.
//!
//! # Complexity
//! O(n · m · s) where n=jobs, m=workers, s=cost of one worker simulation.
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, Result};
use crate::models::{Assignment, Job};
use crate::problem::Problem;
use crate::simulator::worker_makespan;

/// Order in which jobs are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOrder {
    /// As given in the problem.
    #[default]
    Input,
    /// By shortest duration on any worker, descending (LPT). Stable.
    LongestFirst,
}

/// Greedy earliest-completion scheduler.
///
/// # Example
///
/// ```
/// use u_aco::models::{Job, Worker};
/// use u_aco::problem::Problem;
/// use u_aco::scheduler::GreedyScheduler;
///
/// let problem = Problem::new(
///     vec![
///         Job::new("J1").with_durations(vec![10.0, 20.0]),
///         Job::new("J2").with_durations(vec![15.0, 5.0]),
///     ],
///     vec![Worker::new("W1"), Worker::new("W2")],
/// )
/// .unwrap();
///
/// let assignment = GreedyScheduler::new().schedule(&problem).unwrap();
/// assert_eq!(assignment.workers, vec![0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    order: JobOrder,
}

impl GreedyScheduler {
    /// Creates a scheduler that places jobs in input order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placement order.
    pub fn with_order(mut self, order: JobOrder) -> Self {
        self.order = order;
        self
    }

    /// Assigns every job of `problem` to a worker.
    pub fn schedule(&self, problem: &Problem) -> Result<Assignment> {
        let jobs = problem.jobs();
        let workers = problem.workers();
        let mut placed: Vec<Vec<&Job>> = vec![Vec::new(); workers.len()];
        let mut assignment = vec![0; jobs.len()];

        for j in self.job_order(jobs) {
            let job = &jobs[j];
            let mut best: Option<(usize, f64)> = None;

            for (w, worker) in workers.iter().enumerate() {
                if !worker.can_handle(job) {
                    continue;
                }
                placed[w].push(job);
                let completion = worker_makespan(&placed[w], worker, w);
                placed[w].pop();

                let completion = completion?;
                if best.is_none_or(|(_, c)| completion < c) {
                    best = Some((w, completion));
                }
            }

            let Some((w, completion)) = best else {
                return Err(AcoError::InfeasibleAssignment {
                    job: job.id.clone(),
                    worker: workers.last().map(|w| w.id.clone()).unwrap_or_default(),
                });
            };
            tracing::trace!(job = %job.id, worker = %workers[w].id, completion, "job placed");
            placed[w].push(job);
            assignment[j] = w;
        }

        Ok(Assignment::new(assignment))
    }

    fn job_order(&self, jobs: &[Job]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        if self.order == JobOrder::LongestFirst {
            let shortest = |job: &Job| job.durations.iter().copied().fold(f64::INFINITY, f64::min);
            indices.sort_by(|&a, &b| shortest(&jobs[b]).total_cmp(&shortest(&jobs[a])));
        }
        indices
    }
}
