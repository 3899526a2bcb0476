//! Validated problem instance.

use serde::Serialize;

use crate::error::{AcoError, Result};
use crate::models::{Assignment, Job, Worker};
use crate::validation::validate_input;

/// A validated set of jobs and workers.
///
/// Construction runs [`validate_input`], so every job is guaranteed a
/// strictly positive duration for every worker index. Worker indices are
/// positions in [`workers`](Self::workers) and stay stable for the lifetime
/// of the problem.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    jobs: Vec<Job>,
    workers: Vec<Worker>,
}

impl Problem {
    /// Validates and wraps the inputs.
    pub fn new(jobs: Vec<Job>, workers: Vec<Worker>) -> Result<Self> {
        validate_input(&jobs, &workers).map_err(AcoError::Validation)?;
        Ok(Self { jobs, workers })
    }

    /// All jobs, in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// All workers, in input order.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of workers.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Resolves an assignment into `(job, worker)` references.
    pub fn resolve<'a>(&'a self, assignment: &Assignment) -> Vec<(&'a Job, &'a Worker)> {
        assignment.resolve(&self.jobs, &self.workers)
    }

    /// Checks an externally built assignment against this problem's shape.
    pub fn check_assignment(&self, assignment: &Assignment) -> Result<()> {
        if assignment.len() != self.jobs.len() {
            return Err(AcoError::config(format!(
                "assignment covers {} jobs, problem has {}",
                assignment.len(),
                self.jobs.len()
            )));
        }
        if let Some((job, worker)) = assignment
            .pairs()
            .find(|&(_, w)| w >= self.workers.len())
        {
            return Err(AcoError::config(format!(
                "job '{}' assigned to unknown worker index {worker}",
                self.jobs[job].id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_problem_accepts_valid_input() {
        let p = Problem::new(
            vec![Job::new("J1").with_durations(vec![1.0, 2.0])],
            vec![Worker::new("W1"), Worker::new("W2")],
        )
        .unwrap();
        assert_eq!(p.job_count(), 1);
        assert_eq!(p.worker_count(), 2);
    }

    #[test]
    fn test_problem_rejects_invalid_input() {
        let err = Problem::new(vec![Job::new("J1").with_durations(vec![0.0])], vec![Worker::new("W1")])
            .unwrap_err();
        match err {
            AcoError::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDuration);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_assignment() {
        let p = Problem::new(
            vec![
                Job::new("J1").with_durations(vec![1.0, 2.0]),
                Job::new("J2").with_durations(vec![1.0, 2.0]),
            ],
            vec![Worker::new("W1"), Worker::new("W2")],
        )
        .unwrap();

        assert!(p.check_assignment(&Assignment::new(vec![0, 1])).is_ok());
        assert!(p.check_assignment(&Assignment::new(vec![0])).is_err());
        assert!(p.check_assignment(&Assignment::new(vec![0, 2])).is_err());
    }
}
