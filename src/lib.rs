//! Ant colony optimization for job-to-worker assignment.
//!
//! Assigns independent jobs to heterogeneous workers so that the makespan
//! (latest worker completion time) is minimal. Workers run several jobs at
//! once within their memory, disk and core capacity, so the cost of an
//! assignment comes from a resource-constrained simulation rather than a
//! sum of durations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `Worker`, `Assignment`
//! - **`validation`**: Input integrity checks (duplicate IDs, duration tables)
//! - **`problem`**: Validated jobs and workers
//! - **`simulator`**: Per-worker makespan under resource constraints
//! - **`pheromone`**: The (job, worker) pheromone field
//! - **`construction`**: Probabilistic ant path construction
//! - **`update`**: Standard and elitist min–max pheromone updates
//! - **`evaluate`**: Greedy read-out of the field
//! - **`search`**: The iteration loop and its observers
//! - **`config`**: Search parameters
//! - **`scheduler`**: Greedy baseline and KPIs
//! - **`tuning`**: Repeat, grid, random and deep random parameter search
//! - **`units`**: Size and duration strings
//!
//! # Example
//!
//! ```
//! use u_aco::{run_search, AcoConfig, Job, Problem, Worker};
//!
//! let problem = Problem::new(
//!     vec![
//!         Job::new("J1").with_durations(vec![10.0, 20.0]).with_memory(1.0),
//!         Job::new("J2").with_durations(vec![15.0, 5.0]).with_memory(1.0),
//!     ],
//!     vec![
//!         Worker::new("W1").with_cores(2).with_memory(2.0),
//!         Worker::new("W2").with_cores(2).with_memory(2.0),
//!     ],
//! )
//! .unwrap();
//!
//! let result = run_search(&problem, &AcoConfig::default().with_seed(42)).unwrap();
//! assert!(result.best_makespan >= 10.0);
//! ```
//!
//! # References
//!
//! - Dorigo & Stützle (2004), "Ant Colony Optimization"
//! - Stützle & Hoos (2000), "MAX–MIN Ant System"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod construction;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod pheromone;
pub mod problem;
pub mod scheduler;
pub mod search;
pub mod simulator;
pub mod tuning;
pub mod units;
pub mod update;
pub mod validation;

pub use config::{AcoConfig, UpdateStrategy};
pub use error::{AcoError, Result};
pub use models::{Assignment, Job, Worker};
pub use problem::Problem;
pub use search::{run_search, run_search_with_observer, SearchResult, Termination};
