//! Daily quest generation and completion service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::hunter_progress::{ProgressPlan, require_hunter, write_progress};
use crate::domain::ports::{
    CompleteQuestRequest, HunterRepository, QuestCommand, QuestCompletion, QuestRepository,
    QuestRepositoryError, QuestSelector, TodaysQuestRequest,
};
use crate::domain::{Error, HunterProgressUpdate, NewQuest, Quest, QuestDate};

fn map_quest_error(error: QuestRepositoryError) -> Error {
    match error {
        QuestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("quest repository unavailable: {message}"))
        }
        QuestRepositoryError::Query { message } => {
            Error::internal(format!("quest repository error: {message}"))
        }
    }
}

fn quest_not_found(date: QuestDate, today: QuestDate) -> Error {
    if date == today {
        Error::not_found("Quest not found for today")
    } else {
        Error::not_found(format!("Quest not found for {date}"))
    }
}

/// Service implementing [`QuestCommand`].
#[derive(Clone)]
pub struct QuestService<H: ?Sized, Q: ?Sized> {
    hunter_repo: Arc<H>,
    quest_repo: Arc<Q>,
    selector: Arc<dyn QuestSelector>,
    clock: Arc<dyn Clock>,
}

impl<H: ?Sized, Q: ?Sized> QuestService<H, Q> {
    pub fn new(
        hunter_repo: Arc<H>,
        quest_repo: Arc<Q>,
        selector: Arc<dyn QuestSelector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hunter_repo,
            quest_repo,
            selector,
            clock,
        }
    }
}

impl<H, Q> QuestService<H, Q>
where
    H: HunterRepository + ?Sized,
    Q: QuestRepository + ?Sized,
{
    /// Hand a claimed quest back when its reward could not be written, so a
    /// retry can complete it again.
    async fn reopen_unrewarded(&self, quest: &Quest, now: DateTime<Utc>) {
        match self.quest_repo.reopen(&quest.id, now).await {
            Ok(true) => debug!(quest_id = %quest.id, "quest reopened after failed award"),
            Ok(false) => warn!(quest_id = %quest.id, "quest was not completed when reopening"),
            Err(error) => warn!(
                quest_id = %quest.id,
                error = %error,
                "quest stays completed without its reward"
            ),
        }
    }
}

#[async_trait]
impl<H, Q> QuestCommand for QuestService<H, Q>
where
    H: HunterRepository + ?Sized,
    Q: QuestRepository + ?Sized,
{
    async fn todays_quest(&self, request: TodaysQuestRequest) -> Result<Quest, Error> {
        let hunter = require_hunter(self.hunter_repo.as_ref(), &request.user_id).await?;
        let now = self.clock.utc();
        let today = QuestDate::of(now);

        if let Some(quest) = self
            .quest_repo
            .find_for_day(&hunter.id(), today)
            .await
            .map_err(map_quest_error)?
        {
            return Ok(quest);
        }

        let template = self.selector.pick();
        debug!(hunter_id = %hunter.id(), title = template.title, "generating daily quest");
        self.quest_repo
            .insert_if_absent(&NewQuest::from_template(hunter.id(), today, template), now)
            .await
            .map_err(map_quest_error)
    }

    async fn complete_quest(&self, request: CompleteQuestRequest) -> Result<QuestCompletion, Error> {
        let hunter = require_hunter(self.hunter_repo.as_ref(), &request.user_id).await?;
        let now = self.clock.utc();
        let today = QuestDate::of(now);
        let date = request.date.unwrap_or(today);

        let quest = self
            .quest_repo
            .find_for_day(&hunter.id(), date)
            .await
            .map_err(map_quest_error)?
            .ok_or_else(|| quest_not_found(date, today))?;
        let reward = quest.exp_reward;

        if quest.completed {
            return Ok(QuestCompletion::AlreadyCompleted { reward });
        }
        let claimed = self
            .quest_repo
            .mark_completed(&quest.id, now)
            .await
            .map_err(map_quest_error)?;
        if !claimed {
            debug!(quest_id = %quest.id, "quest completed by a concurrent request");
            return Ok(QuestCompletion::AlreadyCompleted { reward });
        }

        let awarded = write_progress(self.hunter_repo.as_ref(), &request.user_id, |hunter| {
            let outcome = hunter.progression().gain(reward);
            ProgressPlan::Write(
                HunterProgressUpdate::progression_only(hunter, outcome.progression, now),
                outcome.leveled_up(),
            )
        })
        .await;
        let (hunter, leveled_up) = match awarded {
            Ok(awarded) => awarded,
            Err(error) => {
                self.reopen_unrewarded(&quest, now).await;
                return Err(error);
            }
        };

        info!(hunter_id = %hunter.id(), %date, reward, "quest completed");

        let progression = hunter.progression();
        Ok(QuestCompletion::Completed {
            reward,
            level: progression.level().get(),
            exp: progression.exp(),
            leveled_up,
        })
    }
}

#[cfg(test)]
#[path = "quest_service_tests.rs"]
mod tests;
