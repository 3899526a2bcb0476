//! Worker model.
//!
//! Workers are the machines jobs run on. Their resource fields are
//! *capacities*: a simulation never mutates them and instead works on a
//! private [`ResourcePool`] copy.

use serde::{Deserialize, Serialize};

use super::Job;

/// A worker machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Total CPU cores.
    pub cores: u32,
    /// Total memory (bytes).
    pub memory: f64,
    /// Total disk (bytes).
    pub disk: f64,
    /// Link bandwidth to the coordinator (bytes/s). Informational.
    pub bandwidth: Option<f64>,
    /// Link latency to the coordinator (seconds). Informational.
    pub latency: Option<f64>,
}

impl Worker {
    /// Creates a single-core worker with no memory or disk.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            cores: 1,
            memory: 0.0,
            disk: 0.0,
            bandwidth: None,
            latency: None,
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the core count.
    pub fn with_cores(mut self, cores: u32) -> Self {
        self.cores = cores;
        self
    }

    /// Sets total memory (bytes).
    pub fn with_memory(mut self, bytes: f64) -> Self {
        self.memory = bytes;
        self
    }

    /// Sets total disk (bytes).
    pub fn with_disk(mut self, bytes: f64) -> Self {
        self.disk = bytes;
        self
    }

    /// Sets coordinator link bandwidth (bytes/s).
    pub fn with_bandwidth(mut self, bytes_per_sec: f64) -> Self {
        self.bandwidth = Some(bytes_per_sec);
        self
    }

    /// Sets coordinator link latency (seconds).
    pub fn with_latency(mut self, seconds: f64) -> Self {
        self.latency = Some(seconds);
        self
    }

    /// Full resource budget, as a fresh pool for one simulation.
    pub fn capacity(&self) -> ResourcePool {
        ResourcePool {
            memory: self.memory,
            disk: self.disk,
            cores: self.cores,
        }
    }

    /// Whether the job fits on this worker when nothing else is running.
    pub fn can_handle(&self, job: &Job) -> bool {
        self.capacity().fits(job)
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

/// Mutable resource counters for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourcePool {
    /// Free memory (bytes).
    pub memory: f64,
    /// Free disk (bytes).
    pub disk: f64,
    /// Free cores.
    pub cores: u32,
}

impl ResourcePool {
    /// Whether the job's requirements fit in the free resources.
    #[inline]
    pub fn fits(&self, job: &Job) -> bool {
        self.memory >= job.memory && self.disk >= job.disk && self.cores >= job.threads
    }

    /// Takes the job's requirements out of the pool.
    #[inline]
    pub fn acquire(&mut self, job: &Job) {
        self.memory -= job.memory;
        self.disk -= job.disk;
        self.cores -= job.threads;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_worker() -> Worker {
        Worker::new("W1")
            .with_name("PC1")
            .with_cores(4)
            .with_memory(8.0)
            .with_disk(100.0)
    }

    #[test]
    fn test_worker_builder() {
        let w = sample_worker().with_bandwidth(1e6).with_latency(0.02);
        assert_eq!(w.id, "W1");
        assert_eq!(w.label(), "PC1");
        assert_eq!(w.cores, 4);
        assert_eq!(w.bandwidth, Some(1e6));
        assert_eq!(w.latency, Some(0.02));
    }

    #[test]
    fn test_can_handle() {
        let w = sample_worker();
        assert!(w.can_handle(&Job::new("ok").with_memory(8.0).with_threads(4)));
        assert!(!w.can_handle(&Job::new("mem").with_memory(8.5)));
        assert!(!w.can_handle(&Job::new("disk").with_disk(101.0)));
        assert!(!w.can_handle(&Job::new("cpu").with_threads(5)));
    }

    #[test]
    fn test_pool_acquire() {
        let w = sample_worker();
        let job = Job::new("J").with_memory(3.0).with_disk(10.0).with_threads(2);
        let mut pool = w.capacity();

        pool.acquire(&job);
        assert_eq!(pool.cores, 2);
        assert!(pool.fits(&job));
        pool.acquire(&job);
        assert!(!pool.fits(&job));

        assert_eq!(pool.memory, 2.0);
        assert_eq!(pool.disk, 80.0);
        // Capacity fields are untouched
        assert_eq!(w.cores, 4);
    }
}
