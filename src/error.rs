use thiserror::Error;

use crate::document::DocumentError;
use crate::queue::QueueError;
use crate::repository::RepositoryError;

/// Malformed input at the edge: identifiers, codes and names that do not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid actor number '{0}' (expected 13-digit GLN or 16-character EIC)")]
    ActorNumber(String),
    #[error("unknown market role '{0}'")]
    MarketRole(String),
    #[error("unknown message category '{0}'")]
    Category(String),
    #[error("unknown document type '{0}'")]
    DocumentType(String),
    #[error("unknown business reason '{0}'")]
    BusinessReason(String),
    #[error("unknown document format '{0}'")]
    DocumentFormat(String),
    #[error("invalid {kind} '{value}'")]
    Id { kind: &'static str, value: String },
}

/// Failure of a delivery use case.
///
/// Steady-state outcomes (empty queue, unknown bundle, malformed dequeue id)
/// are not errors; see `PeekOutcome` and `DequeueOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl DeliveryError {
    /// An optimistic-concurrency conflict that survived every retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DeliveryError::Repository(err) if err.is_conflict())
    }
}
