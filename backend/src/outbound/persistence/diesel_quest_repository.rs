//! PostgreSQL-backed [`QuestRepository`].
//!
//! The `(user_id, quest_date)` unique constraint enforces one quest per
//! hunter per day. Inserts use `ON CONFLICT DO NOTHING` and then read back
//! whichever row won, so concurrent first requests converge on one quest.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{QuestRepository, QuestRepositoryError};
use crate::domain::{HunterId, NewQuest, Quest, QuestDate};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewQuestRow, QuestRow, to_db_i64};
use super::pool::DbPool;
use super::schema::quests;

/// Diesel-backed daily quest store.
#[derive(Clone)]
pub struct DieselQuestRepository {
    pool: DbPool,
}

impl DieselQuestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_quest(row: QuestRow) -> Result<Quest, QuestRepositoryError> {
    Quest::try_from(row).map_err(map_row_error::<QuestRepositoryError>)
}

#[async_trait]
impl QuestRepository for DieselQuestRepository {
    async fn find_for_day(
        &self,
        user_id: &HunterId,
        date: QuestDate,
    ) -> Result<Option<Quest>, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<QuestRepositoryError>)?;

        let row: Option<QuestRow> = quests::table
            .filter(quests::user_id.eq(user_id.as_uuid()))
            .filter(quests::quest_date.eq(date.as_naive()))
            .select(QuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error::<QuestRepositoryError>)?;
        row.map(to_quest).transpose()
    }

    async fn insert_if_absent(
        &self,
        quest: &NewQuest,
        now: DateTime<Utc>,
    ) -> Result<Quest, QuestRepositoryError> {
        let exp_reward = to_db_i64("exp_reward", quest.exp_reward).map_err(map_row_error::<QuestRepositoryError>)?;
        let row = NewQuestRow {
            id: Uuid::new_v4(),
            user_id: *quest.user_id.as_uuid(),
            quest_date: quest.date.as_naive(),
            title: &quest.title,
            description: &quest.description,
            exp_reward,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error::<QuestRepositoryError>)?;
        diesel::insert_into(quests::table)
            .values(&row)
            .on_conflict((quests::user_id, quests::quest_date))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error::<QuestRepositoryError>)?;

        let stored: QuestRow = quests::table
            .filter(quests::user_id.eq(row.user_id))
            .filter(quests::quest_date.eq(row.quest_date))
            .select(QuestRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error::<QuestRepositoryError>)?;
        to_quest(stored)
    }

    async fn mark_completed(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<QuestRepositoryError>)?;

        let updated = diesel::update(
            quests::table
                .filter(quests::id.eq(quest_id))
                .filter(quests::completed.eq(false)),
        )
        .set((quests::completed.eq(true), quests::updated_at.eq(now)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error::<QuestRepositoryError>)?;
        Ok(updated == 1)
    }

    async fn reopen(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_pool_error::<QuestRepositoryError>)?;

        let updated = diesel::update(
            quests::table
                .filter(quests::id.eq(quest_id))
                .filter(quests::completed.eq(true)),
        )
        .set((quests::completed.eq(false), quests::updated_at.eq(now)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error::<QuestRepositoryError>)?;
        Ok(updated == 1)
    }
}
