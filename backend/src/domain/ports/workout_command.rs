//! Driving port for logging workouts.

use async_trait::async_trait;

use crate::domain::{Difficulty, Error, HunterId, WorkoutMinutes, WorkoutType};

/// Validated workout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogWorkoutRequest {
    pub user_id: HunterId,
    pub workout_type: WorkoutType,
    pub minutes: WorkoutMinutes,
    pub difficulty: Difficulty,
}

/// Progress after a workout was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogWorkoutResponse {
    pub exp_gain: u64,
    pub level: u32,
    pub exp: u64,
    pub leveled_up: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutCommand: Send + Sync {
    async fn log_workout(&self, request: LogWorkoutRequest) -> Result<LogWorkoutResponse, Error>;
}
