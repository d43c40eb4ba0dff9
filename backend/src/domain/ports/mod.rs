//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod checkin_command;
mod checkin_repository;
mod hunter_command;
mod hunter_query;
mod hunter_repository;
mod quest_command;
mod quest_repository;
mod quest_selector;
mod store_diagnostics;
mod store_status_query;
mod workout_command;
mod workout_repository;

#[cfg(test)]
pub use checkin_command::MockCheckinCommand;
pub use checkin_command::{CheckinCommand, CheckinOutcome, CheckinRequest};
#[cfg(test)]
pub use checkin_repository::MockCheckinRepository;
pub use checkin_repository::{CheckinRepository, CheckinRepositoryError};
#[cfg(test)]
pub use hunter_command::MockHunterCommand;
pub use hunter_command::{CreateHunterRequest, CreateHunterResponse, HunterCommand};
#[cfg(test)]
pub use hunter_query::MockHunterQuery;
pub use hunter_query::{HUNTER_LIST_LIMIT, HunterQuery, ProfileRequest};
#[cfg(test)]
pub use hunter_repository::MockHunterRepository;
pub use hunter_repository::{HunterRepository, HunterRepositoryError};
#[cfg(test)]
pub use quest_command::MockQuestCommand;
pub use quest_command::{
    CompleteQuestRequest, QuestCommand, QuestCompletion, TodaysQuestRequest,
};
#[cfg(test)]
pub use quest_repository::MockQuestRepository;
pub use quest_repository::{QuestRepository, QuestRepositoryError};
#[cfg(test)]
pub use quest_selector::MockQuestSelector;
pub use quest_selector::{FixedQuestSelector, QuestSelector, RandomQuestSelector};
#[cfg(test)]
pub use store_diagnostics::MockStoreDiagnostics;
pub use store_diagnostics::{StoreDiagnostics, StoreDiagnosticsError};
#[cfg(test)]
pub use store_status_query::MockStoreStatusQuery;
pub use store_status_query::{COLLECTION_LIST_LIMIT, StoreStatusQuery};
#[cfg(test)]
pub use workout_command::MockWorkoutCommand;
pub use workout_command::{LogWorkoutRequest, LogWorkoutResponse, WorkoutCommand};
#[cfg(test)]
pub use workout_repository::MockWorkoutRepository;
pub use workout_repository::{WorkoutRepository, WorkoutRepositoryError};
