//! Domain error types.

use common::{AnswerId, QuestionId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
///
/// The first three variants are expected outcomes of well-formed requests
/// and translate to user-facing replies; only `Store` indicates a failure.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller has not registered yet.
    #[error("participant is not registered")]
    NotRegistered,

    /// The referenced question does not exist.
    #[error("question {0} not found")]
    QuestionNotFound(QuestionId),

    /// The referenced answer does not exist.
    #[error("answer {0} not found")]
    AnswerNotFound(AnswerId),

    /// An error occurred in the store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
