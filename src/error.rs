//! Error types.
//!
//! Every failure in this crate is structural: bad parameters or input data
//! that no retry can fix. Running out of iterations is not an error; see
//! [`Termination`](crate::search::Termination).

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the optimizer and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcoError {
    /// Invalid parameter or degenerate numeric state (zero duration,
    /// collapsed desirability, empty tau interval).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A job needs more memory, disk or cores than the worker has in total.
    #[error("Job '{job}' cannot run on worker '{worker}': requirement exceeds total capacity")]
    InfeasibleAssignment { job: String, worker: String },

    /// Input data failed structural validation.
    #[error("Invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A size or duration string could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AcoError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, AcoError>;
