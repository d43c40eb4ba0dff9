//! Port for daily quest storage.
//!
//! Adapters guarantee at most one quest per hunter per day and flip
//! `completed` with a single conditional write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{HunterId, NewQuest, Quest, QuestDate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by quest repository adapters.
    pub enum QuestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "quest repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "quest repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Fetch the quest assigned to `user_id` on `date`.
    async fn find_for_day(
        &self,
        user_id: &HunterId,
        date: QuestDate,
    ) -> Result<Option<Quest>, QuestRepositoryError>;

    /// Insert `quest` unless one already exists for the same hunter and day,
    /// returning whichever quest is stored afterwards.
    async fn insert_if_absent(
        &self,
        quest: &NewQuest,
        now: DateTime<Utc>,
    ) -> Result<Quest, QuestRepositoryError>;

    /// Mark a quest completed if it is still open.
    ///
    /// Returns `true` when this call performed the transition and `false`
    /// when the quest was already completed.
    async fn mark_completed(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError>;

    /// Reopen a completed quest whose reward could not be applied.
    ///
    /// Returns `true` when this call flipped `completed` back to `false`.
    async fn reopen(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError>;
}
