use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("concurrent write detected for queue {id} (expected version {expected}, got {actual})")]
    ConcurrentWrite {
        id: String,
        expected: u64,
        actual: u64,
    },
    /// A write would break a storage invariant (for example a queue change
    /// without its message row). Never retried.
    #[error("inconsistent write: {0}")]
    Inconsistent(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Whether reloading and retrying the operation can succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::ConcurrentWrite { .. })
    }
}
