//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the dataset schema or of the
/// filter selection rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid dataset document: {message}")]
    InvalidDocument { message: String },

    #[error("duplicate saga id in dataset: {0}")]
    DuplicateSagaId(String),

    #[error("arc selection is disabled until a saga is selected (arc: {0})")]
    ArcSelectionDisabled(String),

    #[error("arc {arc} does not belong to saga {saga}")]
    ArcNotInSaga { arc: String, saga: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
