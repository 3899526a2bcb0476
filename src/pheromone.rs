//! Pheromone field.
//!
//! One cell per (job, worker) pair of the full cross product. Each cell
//! (a *match*) holds a mutable pheromone value and the job's processing
//! duration on that worker, fixed at construction.
//!
//! The field is the only state that survives from one iteration to the next.
//! It is owned by the search loop and lent to construction (read-only),
//! update (mutable) and evaluation (read-only).

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, Result};
use crate::problem::Problem;

/// Dense `jobs × workers` pheromone and duration matrix (row-major by job).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneField {
    jobs: usize,
    workers: usize,
    pheromone: Vec<f64>,
    durations: Vec<f64>,
}

/// Read-only view of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Job index.
    pub job: usize,
    /// Worker index.
    pub worker: usize,
    /// Current pheromone.
    pub pheromone: f64,
    /// Processing duration of the job on the worker (seconds).
    pub duration: f64,
}

impl PheromoneField {
    /// Creates a uniform field over every (job, worker) pair.
    pub fn new(problem: &Problem, initial: f64) -> Result<Self> {
        if !(initial > 0.0 && initial.is_finite()) {
            return Err(AcoError::config(format!(
                "initial pheromone must be positive and finite, got {initial}"
            )));
        }
        let jobs = problem.job_count();
        let workers = problem.worker_count();
        let durations = problem
            .jobs()
            .iter()
            .flat_map(|job| job.durations.iter().copied())
            .collect::<Vec<_>>();
        debug_assert_eq!(durations.len(), jobs * workers);

        Ok(Self {
            jobs,
            workers,
            pheromone: vec![initial; jobs * workers],
            durations,
        })
    }

    /// Number of jobs (rows).
    pub fn job_count(&self) -> usize {
        self.jobs
    }

    /// Number of workers (columns).
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    #[inline]
    fn idx(&self, job: usize, worker: usize) -> usize {
        job * self.workers + worker
    }

    /// Pheromone on (job, worker).
    #[inline]
    pub fn get(&self, job: usize, worker: usize) -> f64 {
        self.pheromone[self.idx(job, worker)]
    }

    /// Overwrites the pheromone on (job, worker).
    #[inline]
    pub fn set(&mut self, job: usize, worker: usize, value: f64) {
        let i = self.idx(job, worker);
        self.pheromone[i] = value;
    }

    /// Duration of job on worker (seconds).
    #[inline]
    pub fn duration(&self, job: usize, worker: usize) -> f64 {
        self.durations[self.idx(job, worker)]
    }

    /// Pheromone values for one job, in worker order.
    pub fn row(&self, job: usize) -> &[f64] {
        let start = job * self.workers;
        &self.pheromone[start..start + self.workers]
    }

    /// Durations for one job, in worker order.
    pub fn duration_row(&self, job: usize) -> &[f64] {
        let start = job * self.workers;
        &self.durations[start..start + self.workers]
    }

    /// All pheromone values, row-major by job.
    pub fn values(&self) -> &[f64] {
        &self.pheromone
    }

    /// Iterates every cell in construction order (job-major).
    pub fn matches(&self) -> impl Iterator<Item = Match> + '_ {
        (0..self.jobs).flat_map(move |job| {
            (0..self.workers).map(move |worker| Match {
                job,
                worker,
                pheromone: self.get(job, worker),
                duration: self.duration(job, worker),
            })
        })
    }

    /// Multiplies every cell by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for tau in &mut self.pheromone {
            *tau *= keep;
        }
    }

    /// Adds `amount` to (job, worker).
    #[inline]
    pub fn deposit(&mut self, job: usize, worker: usize, amount: f64) {
        let i = self.idx(job, worker);
        self.pheromone[i] += amount;
    }

    /// Adds `amount` to (job, worker), then clamps that cell into `[min, max]`.
    #[inline]
    pub fn deposit_clamped(&mut self, job: usize, worker: usize, amount: f64, min: f64, max: f64) {
        let i = self.idx(job, worker);
        self.pheromone[i] = (self.pheromone[i] + amount).clamp(min, max);
    }

    /// Clamps every cell into `[min, max]`.
    pub fn clamp_all(&mut self, min: f64, max: f64) {
        for tau in &mut self.pheromone {
            *tau = tau.clamp(min, max);
        }
    }

    /// Worker with the highest pheromone for `job`; the first one wins ties.
    pub fn strongest_worker(&self, job: usize) -> usize {
        let row = self.row(job);
        let mut best = 0;
        for (w, &tau) in row.iter().enumerate().skip(1) {
            if tau > row[best] {
                best = w;
            }
        }
        best
    }

    /// Smallest and largest pheromone value in the field.
    pub fn range(&self) -> (f64, f64) {
        self.pheromone
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Worker};

    fn problem() -> Problem {
        Problem::new(
            vec![
                Job::new("J1").with_durations(vec![10.0, 20.0, 30.0]),
                Job::new("J2").with_durations(vec![15.0, 5.0, 25.0]),
            ],
            vec![Worker::new("W1"), Worker::new("W2"), Worker::new("W3")],
        )
        .unwrap()
    }

    #[test]
    fn test_new_field_is_uniform() {
        let f = PheromoneField::new(&problem(), 0.5).unwrap();
        assert_eq!(f.job_count(), 2);
        assert_eq!(f.worker_count(), 3);
        assert!(f.values().iter().all(|&t| t == 0.5));
        assert_eq!(f.duration(1, 1), 5.0);
        assert_eq!(f.duration_row(0), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_rejects_non_positive_initial() {
        assert!(PheromoneField::new(&problem(), 0.0).is_err());
        assert!(PheromoneField::new(&problem(), -1.0).is_err());
        assert!(PheromoneField::new(&problem(), f64::NAN).is_err());
    }

    #[test]
    fn test_evaporation_decreases_every_cell() {
        let mut f = PheromoneField::new(&problem(), 1.0).unwrap();
        f.deposit(0, 2, 3.0);
        let before = f.values().to_vec();
        f.evaporate(0.25);
        for (b, a) in before.iter().zip(f.values()) {
            assert!(a < b);
            assert!((a - b * 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn test_full_evaporation_collapses_to_zero() {
        let mut f = PheromoneField::new(&problem(), 1.0).unwrap();
        f.evaporate(1.0);
        assert!(f.values().iter().all(|&t| t == 0.0));
        f.deposit(1, 0, 2.0);
        assert_eq!(f.get(1, 0), 2.0);
    }

    #[test]
    fn test_deposit_clamped() {
        let mut f = PheromoneField::new(&problem(), 1.0).unwrap();
        f.deposit_clamped(0, 0, 10.0, 0.1, 2.0);
        assert_eq!(f.get(0, 0), 2.0);
        f.set(0, 1, 0.01);
        f.deposit_clamped(0, 1, 0.0, 0.1, 2.0);
        assert_eq!(f.get(0, 1), 0.1);
    }

    #[test]
    fn test_strongest_worker_first_wins_ties() {
        let mut f = PheromoneField::new(&problem(), 1.0).unwrap();
        assert_eq!(f.strongest_worker(0), 0);
        f.set(0, 1, 3.0);
        f.set(0, 2, 3.0);
        assert_eq!(f.strongest_worker(0), 1);
    }

    #[test]
    fn test_matches_in_construction_order() {
        let f = PheromoneField::new(&problem(), 1.0).unwrap();
        let cells: Vec<(usize, usize)> = f.matches().map(|m| (m.job, m.worker)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_range() {
        let mut f = PheromoneField::new(&problem(), 1.0).unwrap();
        f.set(1, 2, 0.2);
        f.set(0, 1, 4.0);
        assert_eq!(f.range(), (0.2, 4.0));
    }
}
