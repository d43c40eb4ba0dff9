//! Daily check-in HTTP handler.
//!
//! ```text
//! POST /api/checkin?user_id=<uuid>
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CheckinOutcome, CheckinRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_hunter_id;

pub const CHECKIN_COMPLETE: &str = "Check-in complete";
pub const ALREADY_CHECKED_IN: &str = "Already checked in today";

/// Query string identifying the hunter.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Hunter identifier.
    pub user_id: String,
}

/// Result of a check-in request.
///
/// `exp_gain` and `leveled_up` are omitted when the hunter had already
/// checked in today.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckinResponse {
    #[schema(example = "Check-in complete")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_gain: Option<u64>,
    pub streak: u32,
    pub level: u32,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leveled_up: Option<bool>,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(outcome: CheckinOutcome) -> Self {
        match outcome {
            CheckinOutcome::AlreadyCheckedIn { streak, level, exp } => Self {
                message: ALREADY_CHECKED_IN.to_owned(),
                exp_gain: None,
                streak,
                level,
                exp,
                leveled_up: None,
            },
            CheckinOutcome::Completed {
                exp_gain,
                streak,
                level,
                exp,
                leveled_up,
            } => Self {
                message: CHECKIN_COMPLETE.to_owned(),
                exp_gain: Some(exp_gain),
                streak,
                level,
                exp,
                leveled_up: Some(leveled_up),
            },
        }
    }
}

/// Record today's check-in, extending or resetting the streak.
#[utoipa::path(
    post,
    path = "/api/checkin",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Check-in recorded or already done today", body = CheckinResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 422, description = "Missing user id", body = ErrorSchema),
        (status = 404, description = "Hunter not found", body = ErrorSchema),
        (status = 409, description = "Concurrent updates collided", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "checkIn"
)]
#[post("/checkin")]
pub async fn check_in(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<CheckinResponse>> {
    let user_id = parse_hunter_id(&query.user_id)?;
    let outcome = state.checkins.check_in(CheckinRequest { user_id }).await?;
    Ok(web::Json(CheckinResponse::from(outcome)))
}

#[cfg(test)]
#[path = "checkins_tests.rs"]
mod tests;
