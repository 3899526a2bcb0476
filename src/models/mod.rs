//! Assignment domain models.
//!
//! Plain data records for the job-to-worker assignment problem. None of
//! these types execute anything or hold search state; the pheromone field
//! lives in [`crate::pheromone`] and execution is simulated by
//! [`crate::simulator`].
//!
//! # Domain Mappings
//!
//! | u-aco | Batch compute | Render farm | CI |
//! |-------|---------------|-------------|----|
//! | Job | Container job | Frame batch | Build |
//! | Worker | Worker PC | Render node | Runner |
//! | Assignment | Placement plan | Frame split | Runner plan |

mod assignment;
mod job;
mod worker;

pub use assignment::Assignment;
pub use job::Job;
pub use worker::{ResourcePool, Worker};
