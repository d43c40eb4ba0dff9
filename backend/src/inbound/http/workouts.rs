//! Workout logging HTTP handler.
//!
//! ```text
//! POST /api/workouts
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Difficulty;
use crate::domain::ports::{LogWorkoutRequest, LogWorkoutResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_hunter_id, parse_minutes, parse_workout_type};

pub const WORKOUT_LOGGED: &str = "Workout logged";

/// Request payload for logging a workout.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WorkoutPayload {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "running")]
    pub workout_type: String,
    /// Whole minutes between 1 and 300.
    #[schema(example = 30)]
    pub minutes: i64,
    /// `easy`, `normal` or `hard`; anything else counts as `normal`.
    #[schema(example = "hard")]
    pub difficulty: Option<String>,
}

/// Progress after the workout was applied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkoutResponse {
    #[schema(example = "Workout logged")]
    pub message: String,
    pub exp_gain: u64,
    pub level: u32,
    pub exp: u64,
    pub leveled_up: bool,
}

impl From<LogWorkoutResponse> for WorkoutResponse {
    fn from(value: LogWorkoutResponse) -> Self {
        Self {
            message: WORKOUT_LOGGED.to_owned(),
            exp_gain: value.exp_gain,
            level: value.level,
            exp: value.exp,
            leveled_up: value.leveled_up,
        }
    }
}

fn parse_workout_payload(payload: WorkoutPayload) -> ApiResult<LogWorkoutRequest> {
    let workout_type = parse_workout_type(payload.workout_type)?;
    let minutes = parse_minutes(payload.minutes)?;
    let difficulty = Difficulty::parse_lenient(payload.difficulty.as_deref());
    let user_id = parse_hunter_id(&payload.user_id)?;
    Ok(LogWorkoutRequest {
        user_id,
        workout_type,
        minutes,
        difficulty,
    })
}

/// Log a workout and award EXP scaled by duration and difficulty.
#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = WorkoutPayload,
    responses(
        (status = 200, description = "Workout logged", body = WorkoutResponse),
        (status = 400, description = "Invalid user id or unparseable body", body = ErrorSchema),
        (status = 404, description = "Hunter not found", body = ErrorSchema),
        (status = 409, description = "Concurrent updates collided", body = ErrorSchema),
        (status = 422, description = "Missing field, minutes out of range or blank workout type", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "logWorkout"
)]
#[post("/workouts")]
pub async fn log_workout(
    state: web::Data<HttpState>,
    payload: web::Json<WorkoutPayload>,
) -> ApiResult<web::Json<WorkoutResponse>> {
    let request = parse_workout_payload(payload.into_inner())?;
    let response = state.workouts.log_workout(request).await?;
    Ok(web::Json(WorkoutResponse::from(response)))
}

#[cfg(test)]
#[path = "workouts_tests.rs"]
mod tests;
