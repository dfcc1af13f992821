//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Why a single dataset candidate was rejected. Recovered by the loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    #[error("source unreachable: {location}: {reason}")]
    Unreachable { location: String, reason: String },

    #[error("parse failure: {location}: {reason}")]
    Parse { location: String, reason: String },
}

impl SourceFailure {
    pub fn location(&self) -> &str {
        match self {
            SourceFailure::Unreachable { location, .. } | SourceFailure::Parse { location, .. } => {
                location
            }
        }
    }
}

fn describe_last(attempts: &[SourceFailure]) -> String {
    attempts
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| "no sources configured".to_string())
}

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unable to load the dataset from any source (last error: {})", describe_last(.attempts))]
    DataUnavailable { attempts: Vec<SourceFailure> },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("selection failed: {message}")]
    Selection { message: String },
}

impl ApplicationError {
    /// The last underlying failure of a `DataUnavailable` error.
    pub fn last_failure(&self) -> Option<&SourceFailure> {
        match self {
            ApplicationError::DataUnavailable { attempts } => attempts.last(),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
