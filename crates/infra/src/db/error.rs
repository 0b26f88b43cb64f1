use thiserror::Error;

use stockroom_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of an inventory store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected input or a missing item; the caller can recover.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The underlying SQLite database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back into an item.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}
