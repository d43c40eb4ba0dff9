//! Hunter roster HTTP handlers.
//!
//! ```text
//! POST /api/hunters
//! GET /api/hunters
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateHunterRequest;
use crate::domain::{Hunter, NewHunter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_hunter_name;

/// Request payload for enrolling a hunter.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateHunterPayload {
    #[schema(example = "Sung Jinwoo")]
    pub name: String,
    #[schema(example = "Shadow Monarch")]
    pub title: Option<String>,
}

/// Stored hunter as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HunterResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    #[schema(example = 1)]
    pub level: u32,
    #[schema(example = 0)]
    pub exp: u64,
    #[schema(example = 0)]
    pub streak: u32,
    pub last_checkin: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Hunter> for HunterResponse {
    fn from(hunter: &Hunter) -> Self {
        let progression = hunter.progression();
        Self {
            id: hunter.id().to_string(),
            name: hunter.name().as_str().to_owned(),
            title: hunter.title().map(str::to_owned),
            level: progression.level().get(),
            exp: progression.exp(),
            streak: hunter.streak(),
            last_checkin: hunter.last_checkin().map(|at| at.to_rfc3339()),
            created_at: hunter.created_at().to_rfc3339(),
            updated_at: hunter.updated_at().to_rfc3339(),
        }
    }
}

/// Enrol a hunter at level 1 with no EXP and no streak.
#[utoipa::path(
    post,
    path = "/api/hunters",
    request_body = CreateHunterPayload,
    responses(
        (status = 200, description = "Created hunter", body = HunterResponse),
        (status = 400, description = "Unparseable body", body = ErrorSchema),
        (status = 422, description = "Missing or blank name", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hunters"],
    operation_id = "createHunter"
)]
#[post("/hunters")]
pub async fn create_hunter(
    state: web::Data<HttpState>,
    payload: web::Json<CreateHunterPayload>,
) -> ApiResult<web::Json<HunterResponse>> {
    let CreateHunterPayload { name, title } = payload.into_inner();
    let name = parse_hunter_name(name)?;
    let response = state
        .hunters
        .create_hunter(CreateHunterRequest {
            hunter: NewHunter { name, title },
        })
        .await?;
    Ok(web::Json(HunterResponse::from(&response.hunter)))
}

/// List up to 100 hunters, oldest first.
#[utoipa::path(
    get,
    path = "/api/hunters",
    responses(
        (status = 200, description = "Hunter roster", body = [HunterResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hunters"],
    operation_id = "listHunters"
)]
#[get("/hunters")]
pub async fn list_hunters(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<HunterResponse>>> {
    let hunters = state.hunters_query.list_hunters().await?;
    Ok(web::Json(hunters.iter().map(HunterResponse::from).collect()))
}

#[cfg(test)]
#[path = "hunters_tests.rs"]
mod tests;
