//! Workout logging service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::hunter_progress::{ProgressPlan, write_progress};
use crate::domain::ports::{
    HunterRepository, LogWorkoutRequest, LogWorkoutResponse, WorkoutCommand, WorkoutRepository,
};
use crate::domain::{Error, HunterProgressUpdate, NewWorkout};

/// Service implementing [`WorkoutCommand`].
#[derive(Clone)]
pub struct WorkoutService<H: ?Sized, W: ?Sized> {
    hunter_repo: Arc<H>,
    workout_repo: Arc<W>,
    clock: Arc<dyn Clock>,
}

impl<H: ?Sized, W: ?Sized> WorkoutService<H, W> {
    pub fn new(hunter_repo: Arc<H>, workout_repo: Arc<W>, clock: Arc<dyn Clock>) -> Self {
        Self {
            hunter_repo,
            workout_repo,
            clock,
        }
    }
}

#[async_trait]
impl<H, W> WorkoutCommand for WorkoutService<H, W>
where
    H: HunterRepository + ?Sized,
    W: WorkoutRepository + ?Sized,
{
    async fn log_workout(&self, request: LogWorkoutRequest) -> Result<LogWorkoutResponse, Error> {
        let now = self.clock.utc();
        let exp_gain = request.difficulty.exp_for(request.minutes);

        let (hunter, leveled_up) =
            write_progress(self.hunter_repo.as_ref(), &request.user_id, |hunter| {
                let outcome = hunter.progression().gain(exp_gain);
                ProgressPlan::Write(
                    HunterProgressUpdate::progression_only(hunter, outcome.progression, now),
                    outcome.leveled_up(),
                )
            })
            .await?;

        let LogWorkoutRequest {
            user_id,
            workout_type,
            minutes,
            difficulty,
        } = request;
        if let Err(error) = self
            .workout_repo
            .insert(
                &NewWorkout {
                    user_id,
                    workout_type,
                    minutes,
                    difficulty,
                    exp_awarded: exp_gain,
                },
                now,
            )
            .await
        {
            warn!(
                hunter_id = %user_id,
                error = %error,
                "workout awarded but its history row was not stored"
            );
        }

        info!(hunter_id = %user_id, exp_gain, %difficulty, "workout logged");

        let progression = hunter.progression();
        Ok(LogWorkoutResponse {
            exp_gain,
            level: progression.level().get(),
            exp: progression.exp(),
            leveled_up,
        })
    }
}

#[cfg(test)]
#[path = "workout_service_tests.rs"]
mod tests;
