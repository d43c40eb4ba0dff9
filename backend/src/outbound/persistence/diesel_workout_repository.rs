//! PostgreSQL-backed [`WorkoutRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{WorkoutRepository, WorkoutRepositoryError};
use crate::domain::{NewWorkout, WorkoutRecord};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, map_row_error};
use super::models::{NewWorkoutRow, WorkoutRow, to_db_i64};
use super::pool::DbPool;
use super::schema::workouts;

/// Diesel-backed workout log.
#[derive(Clone)]
pub struct DieselWorkoutRepository {
    pool: DbPool,
}

impl DieselWorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutRepository for DieselWorkoutRepository {
    async fn insert(
        &self,
        workout: &NewWorkout,
        now: DateTime<Utc>,
    ) -> Result<WorkoutRecord, WorkoutRepositoryError> {
        let exp_awarded = to_db_i64("exp_awarded", workout.exp_awarded).map_err(map_row_error::<WorkoutRepositoryError>)?;
        let row = NewWorkoutRow {
            id: Uuid::new_v4(),
            user_id: *workout.user_id.as_uuid(),
            workout_type: workout.workout_type.as_str(),
            minutes: i32::from(workout.minutes.get()),
            difficulty: workout.difficulty.as_str(),
            exp_awarded,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error::<WorkoutRepositoryError>)?;
        let stored: WorkoutRow = diesel::insert_into(workouts::table)
            .values(&row)
            .returning(WorkoutRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error::<WorkoutRepositoryError>)?;
        WorkoutRecord::try_from(stored).map_err(map_row_error::<WorkoutRepositoryError>)
    }
}
