//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: request and response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep domain types free of
//!   utoipa derives
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::checkins::CheckinResponse;
use crate::inbound::http::health::{DiagnosticsResponse, FallbackResponse, RootResponse};
use crate::inbound::http::hunters::{CreateHunterPayload, HunterResponse};
use crate::inbound::http::profile::ProfileResponse;
use crate::inbound::http::quests::{CompleteQuestPayload, QuestCompletionResponse, QuestResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::workouts::{WorkoutPayload, WorkoutResponse};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solo Leveling Fitness API",
        description = "Hunters earn EXP from workouts, daily quests and check-ins."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::diagnostics,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::hunters::create_hunter,
        crate::inbound::http::hunters::list_hunters,
        crate::inbound::http::checkins::check_in,
        crate::inbound::http::workouts::log_workout,
        crate::inbound::http::quests::todays_quest,
        crate::inbound::http::quests::complete_quest,
        crate::inbound::http::profile::get_profile,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RootResponse,
        DiagnosticsResponse,
        FallbackResponse,
        CreateHunterPayload,
        HunterResponse,
        CheckinResponse,
        WorkoutPayload,
        WorkoutResponse,
        QuestResponse,
        CompleteQuestPayload,
        QuestCompletionResponse,
        ProfileResponse
    )),
    tags(
        (name = "hunters", description = "Hunter roster and profiles"),
        (name = "progress", description = "Check-ins and workouts that award EXP"),
        (name = "quests", description = "Daily quests"),
        (name = "health", description = "Endpoints for health checks and diagnostics")
    )
)]
pub struct ApiDoc;
