//! Port for hunter persistence with optimistic concurrency on progress.
//!
//! Progress writes are compare-and-swap operations keyed on the hunter's
//! revision. A stale revision yields [`HunterRepositoryError::RevisionMismatch`]
//! so callers can re-read and recompute.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Hunter, HunterId, HunterProgressUpdate, NewHunter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by hunter repository adapters.
    pub enum HunterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "hunter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "hunter repository query failed: {message}",
        /// The stored revision no longer matches the caller's snapshot.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The hunter vanished between read and write.
        NotFound { id: String } => "hunter {id} not found",
    }
}

/// Port for storing hunters and their progression.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HunterRepository: Send + Sync {
    /// Insert a new hunter at revision 1 and return the stored row.
    async fn create(
        &self,
        hunter: &NewHunter,
        now: DateTime<Utc>,
    ) -> Result<Hunter, HunterRepositoryError>;

    /// List hunters in creation order, at most `limit` rows.
    async fn list(&self, limit: usize) -> Result<Vec<Hunter>, HunterRepositoryError>;

    /// Fetch a hunter by identifier.
    async fn find_by_id(&self, id: &HunterId) -> Result<Option<Hunter>, HunterRepositoryError>;

    /// Write progress fields when the stored revision equals
    /// `expected_revision`, bumping the revision by one.
    async fn save_progress(
        &self,
        id: &HunterId,
        expected_revision: u32,
        update: &HunterProgressUpdate,
    ) -> Result<Hunter, HunterRepositoryError>;
}
