//! Driving port for daily quests.

use async_trait::async_trait;

use crate::domain::{Error, HunterId, Quest, QuestDate};

/// Request for the hunter's quest of the current UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodaysQuestRequest {
    pub user_id: HunterId,
}

/// Request to complete a quest; `date` defaults to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteQuestRequest {
    pub user_id: HunterId,
    pub date: Option<QuestDate>,
}

/// Outcome of a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestCompletion {
    /// The quest was completed earlier; no EXP was awarded.
    AlreadyCompleted { reward: u64 },
    /// This request completed the quest and awarded its reward.
    Completed {
        reward: u64,
        level: u32,
        exp: u64,
        leveled_up: bool,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestCommand: Send + Sync {
    /// Return today's quest, generating it on first access.
    async fn todays_quest(&self, request: TodaysQuestRequest) -> Result<Quest, Error>;

    async fn complete_quest(&self, request: CompleteQuestRequest) -> Result<QuestCompletion, Error>;
}
