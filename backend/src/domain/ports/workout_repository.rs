//! Port for the append-only workout log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewWorkout, WorkoutRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by workout repository adapters.
    pub enum WorkoutRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "workout repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "workout repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Append a workout entry.
    async fn insert(
        &self,
        workout: &NewWorkout,
        now: DateTime<Utc>,
    ) -> Result<WorkoutRecord, WorkoutRepositoryError>;
}
