//! Hunter profile HTTP handler.
//!
//! ```text
//! GET /api/profile?user_id=<uuid>
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::HunterProfile;
use crate::domain::ports::ProfileRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::checkins::UserIdQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_hunter_id;

/// Progress summary for one hunter.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub level: u32,
    pub exp: u64,
    /// EXP required to finish the current level.
    #[schema(example = 282)]
    pub exp_to_next: u64,
    /// Share of `exp_to_next` already earned, floored and capped at 100.
    #[schema(example = 42)]
    pub progress_pct: u8,
    pub streak: u32,
}

impl From<HunterProfile> for ProfileResponse {
    fn from(profile: HunterProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            title: profile.title,
            level: profile.level,
            exp: profile.exp,
            exp_to_next: profile.exp_to_next,
            progress_pct: profile.progress_pct,
            streak: profile.streak,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profile",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Hunter profile", body = ProfileResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 422, description = "Missing user id", body = ErrorSchema),
        (status = 404, description = "Hunter not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hunters"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = parse_hunter_id(&query.user_id)?;
    let profile = state.hunters_query.profile(ProfileRequest { user_id }).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}
