//! Assignment (solution) model.
//!
//! An assignment maps every job to one worker. It is also the shape of an
//! ant's path: one (job, worker) decision per job, in job order.

use serde::{Deserialize, Serialize};

use super::{Job, Worker};

/// A complete job-to-worker mapping, stored as indices.
///
/// `workers[j]` is the index of the worker that runs job `j`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Worker index per job index.
    pub workers: Vec<usize>,
}

impl Assignment {
    /// Creates an assignment from a worker index per job.
    pub fn new(workers: Vec<usize>) -> Self {
        Self { workers }
    }

    /// Number of assigned jobs.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Whether no job is assigned.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Worker index for a job index.
    pub fn worker_of(&self, job: usize) -> Option<usize> {
        self.workers.get(job).copied()
    }

    /// Iterates `(job_index, worker_index)` pairs in job order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.workers.iter().copied().enumerate()
    }

    /// Number of distinct workers used.
    pub fn distinct_workers(&self) -> usize {
        let mut seen: Vec<usize> = self.workers.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Job indices grouped by worker index (`result[w]` = jobs on `w`).
    ///
    /// Jobs keep their relative order within each group.
    pub fn jobs_by_worker(&self, worker_count: usize) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); worker_count];
        for (job, worker) in self.pairs() {
            groups[worker].push(job);
        }
        groups
    }

    /// Resolves indices to `(job, worker)` references.
    pub fn resolve<'a>(&self, jobs: &'a [Job], workers: &'a [Worker]) -> Vec<(&'a Job, &'a Worker)> {
        self.pairs().map(|(j, w)| (&jobs[j], &workers[w])).collect()
    }
}
