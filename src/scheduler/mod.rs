//! Greedy baseline and KPI evaluation.
//!
//! Provides a deterministic list scheduler to compare the ACO search
//! against, and quality metrics for any complete assignment.
//!
//! # Algorithm
//!
//! `GreedyScheduler` places each job on the capable worker whose simulated
//! completion time grows the least. It is not optimal, but gives a fast
//! reference makespan.
//!
//! # KPI
//!
//! `AssignmentKpi` reports makespan, per-worker completion times and
//! utilization. `improvement` compares two makespans.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

mod greedy;
mod kpi;

pub use greedy::{GreedyScheduler, JobOrder};
pub use kpi::{improvement, AssignmentKpi, Improvement};
