//! Input validation for assignment problems.
//!
//! Checks structural integrity of jobs and workers before a search.
//! Detects:
//! - Empty job list or worker pool
//! - Duplicate IDs
//! - Duration tables that do not cover every worker
//! - Missing, non-positive or non-finite durations
//! - Negative or non-finite resource quantities
//!
//! Jobs that exceed a worker's capacity are *not* rejected here: they are
//! reported at simulation time, when an ant actually places them there.

use crate::models::{Job, Worker};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// No jobs to assign.
    EmptyJobList,
    /// No workers to assign to.
    EmptyWorkerPool,
    /// A job's duration table length differs from the worker count.
    DurationTableMismatch,
    /// A duration entry is absent (NaN placeholder).
    MissingDuration,
    /// A duration is zero, negative or infinite.
    InvalidDuration,
    /// A memory or disk quantity is negative or not finite.
    InvalidResource,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an assignment problem.
///
/// Checks:
/// 1. At least one job and one worker
/// 2. No duplicate job IDs, no duplicate worker IDs
/// 3. Every job has exactly one duration per worker
/// 4. Every duration is finite and strictly positive
/// 5. Memory and disk quantities are finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();

    if jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyJobList,
            "No jobs to assign",
        ));
    }
    if workers.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkerPool,
            "No workers available",
        ));
    }

    let mut worker_ids = HashSet::new();
    for w in workers {
        if !worker_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }
        if !is_quantity(w.memory) || !is_quantity(w.disk) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResource,
                format!("Worker '{}' has an invalid memory or disk capacity", w.id),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if !is_quantity(job.memory) || !is_quantity(job.disk) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResource,
                format!("Job '{}' has an invalid memory or disk requirement", job.id),
            ));
        }

        if job.durations.len() != workers.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationTableMismatch,
                format!(
                    "Job '{}' has {} durations for {} workers",
                    job.id,
                    job.durations.len(),
                    workers.len()
                ),
            ));
            continue;
        }

        for (w, &d) in job.durations.iter().enumerate() {
            if d.is_nan() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingDuration,
                    format!("Job '{}' has no duration on worker '{}'", job.id, workers[w].id),
                ));
            } else if !(d > 0.0 && d.is_finite()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDuration,
                    format!(
                        "Job '{}' has non-positive duration {d} on worker '{}'",
                        job.id, workers[w].id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_quantity(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workers() -> Vec<Worker> {
        vec![
            Worker::new("W1").with_cores(2).with_memory(4.0),
            Worker::new("W2").with_cores(4).with_memory(8.0),
        ]
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new("J1").with_durations(vec![10.0, 20.0]),
            Job::new("J2").with_durations(vec![15.0, 5.0]),
        ]
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_jobs(), &sample_workers()).is_ok());
    }

    #[test]
    fn test_empty_inputs() {
        let errors = validate_input(&[], &[]).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::EmptyJobList));
        assert!(has_kind(&errors, ValidationErrorKind::EmptyWorkerPool));
    }

    #[test]
    fn test_duplicate_job_id() {
        let jobs = vec![
            Job::new("J1").with_durations(vec![1.0, 1.0]),
            Job::new("J1").with_durations(vec![2.0, 2.0]),
        ];
        let errors = validate_input(&jobs, &sample_workers()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("job")));
    }

    #[test]
    fn test_duplicate_worker_id() {
        let workers = vec![Worker::new("W1"), Worker::new("W1")];
        let errors = validate_input(&sample_jobs(), &workers).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("worker")));
    }

    #[test]
    fn test_duration_table_mismatch() {
        let jobs = vec![Job::new("J1").with_durations(vec![1.0])];
        let errors = validate_input(&jobs, &sample_workers()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::DurationTableMismatch));
    }

    #[test]
    fn test_missing_duration() {
        let jobs = vec![Job::new("J1").with_duration(1, 3.0)];
        let errors = validate_input(&jobs, &sample_workers()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::MissingDuration));
    }

    #[test]
    fn test_non_positive_duration() {
        let jobs = vec![
            Job::new("zero").with_durations(vec![0.0, 1.0]),
            Job::new("neg").with_durations(vec![1.0, -2.0]),
            Job::new("inf").with_durations(vec![f64::INFINITY, 1.0]),
        ];
        let errors = validate_input(&jobs, &sample_workers()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidDuration)
                .count(),
            3
        );
    }

    #[test]
    fn test_invalid_resource() {
        let jobs = vec![Job::new("J1").with_durations(vec![1.0, 1.0]).with_memory(-1.0)];
        let workers = vec![Worker::new("W1").with_disk(f64::NAN), Worker::new("W2")];
        let errors = validate_input(&jobs, &workers).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidResource)
                .count(),
            2
        );
    }

    #[test]
    fn test_oversized_job_is_not_a_validation_error() {
        let jobs = vec![Job::new("big").with_durations(vec![1.0, 1.0]).with_threads(64)];
        assert!(validate_input(&jobs, &sample_workers()).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![
            Job::new("J1").with_durations(vec![0.0, 1.0]),
            Job::new("J1").with_durations(vec![1.0]),
        ];
        let errors = validate_input(&jobs, &sample_workers()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
