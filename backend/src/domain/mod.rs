//! Domain primitives, rules and use-case services.
//!
//! Purpose: define strongly typed hunter progression entities and the
//! services behind the driving ports. Nothing here depends on HTTP or a
//! concrete store; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - Level / Progression - the leveling curve and carry-over arithmetic.
//! - Hunter, WorkoutRecord, Quest, CheckinRecord - stored entities.
//! - HunterService, CheckinService, WorkoutService, QuestService,
//!   StoreStatusService - driving port implementations.

pub mod checkin;
mod checkin_service;
pub mod error;
pub mod hunter;
pub(crate) mod hunter_progress;
mod hunter_service;
pub mod leveling;
pub mod ports;
pub mod profile;
pub mod quest;
mod quest_service;
pub mod store_status;
mod store_status_service;
pub mod trace_id;
pub mod workout;
mod workout_service;

pub use self::checkin::{
    CHECKIN_BASE_EXP, CheckinDecision, CheckinRecord, NewCheckin, STREAK_BONUS_CAP, checkin_exp,
    decide_checkin,
};
pub use self::checkin_service::CheckinService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hunter::{
    Hunter, HunterDraft, HunterId, HunterName, HunterProgressUpdate, HunterValidationError,
    NewHunter,
};
pub use self::hunter_service::HunterService;
pub use self::leveling::{InvalidLevel, Level, LevelUp, Progression};
pub use self::profile::HunterProfile;
pub use self::quest::{
    InvalidQuestDate, NewQuest, QUEST_CATALOGUE, QUEST_DESCRIPTION, Quest,
    QuestDate, QuestTemplate,
};
pub use self::quest_service::QuestService;
pub use self::store_status::{ProviderFailure, StoreKind, StoreReport, StoreStatus};
pub use self::store_status_service::StoreStatusService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::workout::{
    Difficulty, NewWorkout, WORKOUT_MINUTES_MAX, WORKOUT_MINUTES_MIN, WorkoutMinutes,
    WorkoutRecord, WorkoutType, WorkoutValidationError,
};
pub use self::workout_service::WorkoutService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hunter_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Hunter not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
