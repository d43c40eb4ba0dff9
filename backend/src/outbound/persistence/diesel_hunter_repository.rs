//! PostgreSQL-backed [`HunterRepository`].
//!
//! Progress writes use `UPDATE ... WHERE id = $1 AND revision = $2` and bump
//! the revision in the same statement. When no row matches, a follow-up read
//! distinguishes a stale revision from a missing hunter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{HunterRepository, HunterRepositoryError};
use crate::domain::{Hunter, HunterId, HunterProgressUpdate, NewHunter};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{HunterRow, NewHunterRow, to_db_i32, to_db_i64};
use super::pool::DbPool;
use super::schema::hunters;

/// Diesel-backed hunter repository.
#[derive(Clone)]
pub struct DieselHunterRepository {
    pool: DbPool,
}

impl DieselHunterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_hunter(row: HunterRow) -> Result<Hunter, HunterRepositoryError> {
    Hunter::try_from(row).map_err(map_row_error::<HunterRepositoryError>)
}

/// Explain why a revision-guarded update touched no rows.
async fn disambiguate_update_failure<C>(
    conn: &mut C,
    id: &HunterId,
    expected_revision: u32,
) -> HunterRepositoryError
where
    C: AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current: Result<Option<i32>, HunterRepositoryError> = hunters::table
        .filter(hunters::id.eq(id.as_uuid()))
        .select(hunters::revision)
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error::<HunterRepositoryError>);

    match current {
        Ok(Some(actual)) => match u32::try_from(actual) {
            Ok(actual) => HunterRepositoryError::revision_mismatch(expected_revision, actual),
            Err(_) => HunterRepositoryError::query("stored revision is negative"),
        },
        Ok(None) => HunterRepositoryError::not_found(id.to_string()),
        Err(error) => error,
    }
}

#[async_trait]
impl HunterRepository for DieselHunterRepository {
    async fn create(
        &self,
        hunter: &NewHunter,
        now: DateTime<Utc>,
    ) -> Result<Hunter, HunterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<HunterRepositoryError>)?;
        let row = NewHunterRow {
            id: Uuid::new_v4(),
            name: hunter.name.as_str(),
            title: hunter.title.as_deref(),
            level: 1,
            exp: 0,
            streak: 0,
            last_checkin: None,
            revision: 1,
            created_at: now,
            updated_at: now,
        };

        let stored: HunterRow = diesel::insert_into(hunters::table)
            .values(&row)
            .returning(HunterRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error::<HunterRepositoryError>)?;
        to_hunter(stored)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Hunter>, HunterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<HunterRepositoryError>)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<HunterRow> = hunters::table
            .order((hunters::created_at.asc(), hunters::id.asc()))
            .limit(limit)
            .select(HunterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<HunterRepositoryError>)?;
        rows.into_iter().map(to_hunter).collect()
    }

    async fn find_by_id(&self, id: &HunterId) -> Result<Option<Hunter>, HunterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<HunterRepositoryError>)?;

        let row: Option<HunterRow> = hunters::table
            .filter(hunters::id.eq(id.as_uuid()))
            .select(HunterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error::<HunterRepositoryError>)?;
        row.map(to_hunter).transpose()
    }

    async fn save_progress(
        &self,
        id: &HunterId,
        expected_revision: u32,
        update: &HunterProgressUpdate,
    ) -> Result<Hunter, HunterRepositoryError> {
        let expected = to_db_i32("revision", expected_revision).map_err(map_row_error::<HunterRepositoryError>)?;
        let level = to_db_i32("level", update.progression.level().get()).map_err(map_row_error::<HunterRepositoryError>)?;
        let exp = to_db_i64("exp", update.progression.exp()).map_err(map_row_error::<HunterRepositoryError>)?;
        let streak = to_db_i32("streak", update.streak).map_err(map_row_error::<HunterRepositoryError>)?;

        let mut conn = self.pool.get().await.map_err(map_pool_error::<HunterRepositoryError>)?;
        let updated: Option<HunterRow> = diesel::update(
            hunters::table
                .filter(hunters::id.eq(id.as_uuid()))
                .filter(hunters::revision.eq(expected)),
        )
        .set((
            hunters::level.eq(level),
            hunters::exp.eq(exp),
            hunters::streak.eq(streak),
            hunters::last_checkin.eq(update.last_checkin),
            hunters::updated_at.eq(update.updated_at),
            hunters::revision.eq(hunters::revision + 1),
        ))
        .returning(HunterRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error::<HunterRepositoryError>)?;

        match updated {
            Some(row) => to_hunter(row),
            None => Err(disambiguate_update_failure(&mut conn, id, expected_revision).await),
        }
    }
}
