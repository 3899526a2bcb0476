//! Job model.
//!
//! A job is a unit of work that runs on exactly one worker. Its processing
//! duration depends on the worker, so durations are stored as a dense table
//! indexed by worker position in the problem's worker list.

use serde::{Deserialize, Serialize};

/// A job to be assigned.
///
/// Pure data: jobs never execute themselves. Execution is modelled by
/// [`worker_makespan`](crate::simulator::worker_makespan).
///
/// # Units
/// Durations are in seconds, memory and disk in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Processing duration per worker index (seconds).
    pub durations: Vec<f64>,
    /// Memory held while running (bytes).
    pub memory: f64,
    /// Disk held while running (bytes).
    pub disk: f64,
    /// Concurrent threads, each occupying one core.
    pub threads: u32,
}

impl Job {
    /// Creates a job with no durations and a single thread.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            durations: Vec::new(),
            memory: 0.0,
            disk: 0.0,
            threads: 1,
        }
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the whole duration table (one entry per worker, in worker order).
    pub fn with_durations(mut self, durations: Vec<f64>) -> Self {
        self.durations = durations;
        self
    }

    /// Sets the duration on one worker.
    ///
    /// Gaps created by a sparse index are filled with NaN, which input
    /// validation reports as a missing duration.
    pub fn with_duration(mut self, worker_index: usize, seconds: f64) -> Self {
        if self.durations.len() <= worker_index {
            self.durations.resize(worker_index + 1, f64::NAN);
        }
        self.durations[worker_index] = seconds;
        self
    }

    /// Sets the memory requirement (bytes).
    pub fn with_memory(mut self, bytes: f64) -> Self {
        self.memory = bytes;
        self
    }

    /// Sets the disk requirement (bytes).
    pub fn with_disk(mut self, bytes: f64) -> Self {
        self.disk = bytes;
        self
    }

    /// Sets the thread count.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Duration on the worker at `worker_index` (seconds).
    ///
    /// # Panics
    /// Panics if the index is outside the duration table. A validated
    /// [`Problem`](crate::problem::Problem) guarantees it never is.
    #[inline]
    pub fn duration_on(&self, worker_index: usize) -> f64 {
        self.durations[worker_index]
    }

    /// Display label: the name if set, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
