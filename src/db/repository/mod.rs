//! Repository Module
//!
//! Query surface and admission engine over the SQLite store. All write
//! paths that touch a capacity counter go through a version-guarded
//! conditional update and run inside a single transaction.

pub mod guest;
pub mod table;

use thiserror::Error;

/// Repository error kinds.
///
/// Business rejections (`AlreadyRsvpd`, `TableFull`, ...) are distinct from
/// transient failures (`Database`, `OptimisticLock`) so that callers can
/// retry only the latter.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Table {0} not found")]
    TableNotFound(i64),

    #[error("Guest '{0}' not found")]
    GuestNotFound(String),

    #[error("Guest '{0}' already has an RSVP")]
    AlreadyRsvpd(String),

    #[error("Guest '{0}' never RSVP'd")]
    NeverRsvpd(String),

    #[error("Guest '{0}' has already arrived")]
    AlreadyArrived(String),

    #[error("Guest '{0}' has not arrived")]
    NotArrived(String),

    #[error("Table {table_id} cannot seat {requested} guests ({remaining} seats left)")]
    TableFull {
        table_id: i64,
        requested: i64,
        remaining: i64,
    },

    #[error("Could not secure optimistic lock, please retry")]
    OptimisticLock,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Whether re-running the whole operation may succeed.
    ///
    /// Only conflict-on-version and opaque store failures qualify; business
    /// rejections stay rejected no matter how often they are retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepoError::OptimisticLock | RepoError::Database(_))
    }
}
