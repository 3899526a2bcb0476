//! Resource-constrained makespan simulation.
//!
//! Turns "these jobs run on this worker" into a completion time. Jobs run
//! concurrently as long as their combined memory, disk and thread
//! requirements fit within the worker's capacity.
//!
//! # Algorithm
//!
//! Discrete-event simulation:
//! 1. Sort jobs by duration on this worker, ascending (stable).
//! 2. Admit, in sorted order, every pending job that fits in the free pool.
//!    Jobs that do not fit wait for the next round.
//! 3. Advance the clock to the earliest completion, drop finished jobs and
//!    recompute free space from capacity minus the jobs still running.
//! 4. Repeat until nothing is pending or running.
//!
//! If nothing is running and nothing could be admitted, some pending job
//! exceeds the worker's total capacity and the simulation fails with
//! [`AcoError::InfeasibleAssignment`] instead of spinning.
//!
//! # Complexity
//! O(n²) per worker in the worst case (one admission pass per event).

use crate::error::{AcoError, Result};
use crate::models::{Assignment, Job, Worker};
use crate::problem::Problem;

/// Remaining time at or below which a running job counts as finished.
const COMPLETION_EPSILON: f64 = 1e-9;

/// Time for `worker` to finish all of `jobs` (seconds).
///
/// `worker_index` selects the duration column in each job's table. Every
/// job must have a finite, strictly positive duration in that column;
/// otherwise the call fails with [`AcoError::Configuration`].
/// Pure: the worker's capacity fields are only read.
pub fn worker_makespan(jobs: &[&Job], worker: &Worker, worker_index: usize) -> Result<f64> {
    for job in jobs {
        match job.durations.get(worker_index) {
            Some(&d) if d > 0.0 && d.is_finite() => {}
            Some(&d) => {
                return Err(AcoError::config(format!(
                    "job '{}' has invalid duration {d} on worker '{}'",
                    job.id, worker.id
                )))
            }
            None => {
                return Err(AcoError::config(format!(
                    "job '{}' has no duration for worker index {worker_index}",
                    job.id
                )))
            }
        }
    }

    let mut pending: Vec<&Job> = jobs.to_vec();
    pending.sort_by(|a, b| {
        a.duration_on(worker_index)
            .total_cmp(&b.duration_on(worker_index))
    });

    let mut pool = worker.capacity();
    let mut running: Vec<(&Job, f64)> = Vec::with_capacity(pending.len());
    let mut clock = 0.0;

    while !pending.is_empty() || !running.is_empty() {
        let mut deferred = Vec::with_capacity(pending.len());
        for job in pending.drain(..) {
            if pool.fits(job) {
                pool.acquire(job);
                running.push((job, job.duration_on(worker_index)));
            } else {
                deferred.push(job);
            }
        }
        pending = deferred;

        if running.is_empty() {
            // Full capacity is free and still nothing fits.
            let job = pending[0];
            return Err(AcoError::InfeasibleAssignment {
                job: job.id.clone(),
                worker: worker.id.clone(),
            });
        }

        let step = running
            .iter()
            .map(|&(_, remaining)| remaining)
            .fold(f64::INFINITY, f64::min);
        clock += step;

        running.retain_mut(|(_, remaining)| {
            *remaining -= step;
            *remaining > COMPLETION_EPSILON
        });

        // Free space is capacity minus what is still running, so an idle
        // worker is back at exactly full capacity.
        pool = worker.capacity();
        for (job, _) in &running {
            pool.acquire(job);
        }
    }

    Ok(clock)
}

/// Completion time of every worker under `assignment` (index = worker).
///
/// Idle workers report 0.
///
/// Fails if `assignment` does not cover every job or names an unknown
/// worker.
pub fn worker_makespans(problem: &Problem, assignment: &Assignment) -> Result<Vec<f64>> {
    problem.check_assignment(assignment)?;
    let jobs = problem.jobs();
    assignment
        .jobs_by_worker(problem.worker_count())
        .iter()
        .zip(problem.workers())
        .enumerate()
        .map(|(w, (job_indices, worker))| {
            let assigned: Vec<&Job> = job_indices.iter().map(|&j| &jobs[j]).collect();
            worker_makespan(&assigned, worker, w)
        })
        .collect()
}

/// Makespan of `assignment`: the latest worker completion time.
pub fn assignment_makespan(problem: &Problem, assignment: &Assignment) -> Result<f64> {
    Ok(worker_makespans(problem, assignment)?
        .into_iter()
        .fold(0.0, f64::max))
}
