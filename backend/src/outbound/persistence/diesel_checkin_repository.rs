//! PostgreSQL-backed [`CheckinRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CheckinRepository, CheckinRepositoryError};
use crate::domain::{CheckinRecord, NewCheckin};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{CheckinRow, NewCheckinRow, to_db_i32};
use super::pool::DbPool;
use super::schema::checkins;

/// Diesel-backed check-in log.
#[derive(Clone)]
pub struct DieselCheckinRepository {
    pool: DbPool,
}

impl DieselCheckinRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckinRepository for DieselCheckinRepository {
    async fn insert(
        &self,
        checkin: &NewCheckin,
        now: DateTime<Utc>,
    ) -> Result<CheckinRecord, CheckinRepositoryError> {
        let streak_after = to_db_i32("streak_after", checkin.streak_after).map_err(map_row_error::<CheckinRepositoryError>)?;
        let row = NewCheckinRow {
            id: Uuid::new_v4(),
            user_id: *checkin.user_id.as_uuid(),
            checkin_date: checkin.date,
            streak_after,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error::<CheckinRepositoryError>)?;
        let stored: CheckinRow = diesel::insert_into(checkins::table)
            .values(&row)
            .returning(CheckinRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error::<CheckinRepositoryError>)?;
        CheckinRecord::try_from(stored).map_err(map_row_error::<CheckinRepositoryError>)
    }
}
