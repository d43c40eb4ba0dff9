//! Daily quest HTTP handlers.
//!
//! ```text
//! GET /api/quests?user_id=<uuid>
//! POST /api/quests/complete
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Quest;
use crate::domain::ports::{CompleteQuestRequest, QuestCompletion, TodaysQuestRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::checkins::UserIdQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_hunter_id, parse_optional_quest_date};

pub const QUEST_COMPLETED: &str = "Quest completed";
pub const QUEST_ALREADY_COMPLETED: &str = "Quest already completed";

/// A hunter's quest for one UTC day.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestResponse {
    pub id: String,
    pub user_id: String,
    #[schema(example = "2024-03-10")]
    pub date: String,
    #[schema(example = "Run 3 km")]
    pub title: String,
    pub description: String,
    #[schema(example = 90)]
    pub exp_reward: u64,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Quest> for QuestResponse {
    fn from(quest: Quest) -> Self {
        Self {
            id: quest.id.to_string(),
            user_id: quest.user_id.to_string(),
            date: quest.date.to_string(),
            title: quest.title,
            description: quest.description,
            exp_reward: quest.exp_reward,
            completed: quest.completed,
            created_at: quest.created_at.to_rfc3339(),
            updated_at: quest.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for completing a quest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CompleteQuestPayload {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    /// Quest day as `YYYY-MM-DD`; defaults to today (UTC).
    #[schema(example = "2024-03-10")]
    pub date: Option<String>,
}

/// Result of a completion request.
///
/// Progress fields are omitted when the quest had already been completed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestCompletionResponse {
    #[schema(example = "Quest completed")]
    pub message: String,
    pub reward: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leveled_up: Option<bool>,
}

impl From<QuestCompletion> for QuestCompletionResponse {
    fn from(value: QuestCompletion) -> Self {
        match value {
            QuestCompletion::AlreadyCompleted { reward } => Self {
                message: QUEST_ALREADY_COMPLETED.to_owned(),
                reward,
                level: None,
                exp: None,
                leveled_up: None,
            },
            QuestCompletion::Completed {
                reward,
                level,
                exp,
                leveled_up,
            } => Self {
                message: QUEST_COMPLETED.to_owned(),
                reward,
                level: Some(level),
                exp: Some(exp),
                leveled_up: Some(leveled_up),
            },
        }
    }
}

/// Fetch today's quest, generating one on first access.
#[utoipa::path(
    get,
    path = "/api/quests",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Today's quest", body = QuestResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 422, description = "Missing user id", body = ErrorSchema),
        (status = 404, description = "Hunter not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quests"],
    operation_id = "todaysQuest"
)]
#[get("/quests")]
pub async fn todays_quest(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<QuestResponse>> {
    let user_id = parse_hunter_id(&query.user_id)?;
    let quest = state
        .quests
        .todays_quest(TodaysQuestRequest { user_id })
        .await?;
    Ok(web::Json(QuestResponse::from(quest)))
}

/// Complete a quest and award its reward once.
#[utoipa::path(
    post,
    path = "/api/quests/complete",
    request_body = CompleteQuestPayload,
    responses(
        (status = 200, description = "Quest completed, or already completed earlier", body = QuestCompletionResponse),
        (status = 400, description = "Invalid user id or unparseable body", body = ErrorSchema),
        (status = 404, description = "Hunter or quest not found", body = ErrorSchema),
        (status = 409, description = "Concurrent updates collided", body = ErrorSchema),
        (status = 422, description = "Missing user id or malformed date", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quests"],
    operation_id = "completeQuest"
)]
#[post("/quests/complete")]
pub async fn complete_quest(
    state: web::Data<HttpState>,
    payload: web::Json<CompleteQuestPayload>,
) -> ApiResult<web::Json<QuestCompletionResponse>> {
    let CompleteQuestPayload { user_id, date } = payload.into_inner();
    let date = parse_optional_quest_date(date.as_deref())?;
    let user_id = parse_hunter_id(&user_id)?;
    let completion = state
        .quests
        .complete_quest(CompleteQuestRequest { user_id, date })
        .await?;
    Ok(web::Json(QuestCompletionResponse::from(completion)))
}

#[cfg(test)]
#[path = "quests_tests.rs"]
mod tests;
