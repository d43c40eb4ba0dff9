//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CheckinCommand, HunterCommand, HunterQuery, QuestCommand, StoreStatusQuery, WorkoutCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub hunters: Arc<dyn HunterCommand>,
    pub hunters_query: Arc<dyn HunterQuery>,
    pub checkins: Arc<dyn CheckinCommand>,
    pub workouts: Arc<dyn WorkoutCommand>,
    pub quests: Arc<dyn QuestCommand>,
    pub store_status: Arc<dyn StoreStatusQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub hunters: Arc<dyn HunterCommand>,
    pub hunters_query: Arc<dyn HunterQuery>,
    pub checkins: Arc<dyn CheckinCommand>,
    pub workouts: Arc<dyn WorkoutCommand>,
    pub quests: Arc<dyn QuestCommand>,
    pub store_status: Arc<dyn StoreStatusQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use hunter_backend::domain::{
    ///     CheckinService, HunterService, QuestService, StoreKind, StoreStatus,
    ///     StoreStatusService, WorkoutService,
    /// };
    /// use hunter_backend::domain::ports::RandomQuestSelector;
    /// use hunter_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use hunter_backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let hunters = Arc::new(HunterService::new(store.clone(), clock.clone()));
    /// let status = StoreStatus {
    ///     kind: StoreKind::InMemory,
    ///     database_url_set: false,
    ///     database_name_set: false,
    ///     fallbacks: Vec::new(),
    /// };
    /// let state = HttpState::new(HttpStatePorts {
    ///     hunters: hunters.clone(),
    ///     hunters_query: hunters,
    ///     checkins: Arc::new(CheckinService::new(store.clone(), store.clone(), clock.clone())),
    ///     workouts: Arc::new(WorkoutService::new(store.clone(), store.clone(), clock.clone())),
    ///     quests: Arc::new(QuestService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         Arc::new(RandomQuestSelector),
    ///         clock,
    ///     )),
    ///     store_status: Arc::new(StoreStatusService::new(store, status)),
    /// });
    /// let _quests = state.quests.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            hunters,
            hunters_query,
            checkins,
            workouts,
            quests,
            store_status,
        } = ports;
        Self {
            hunters,
            hunters_query,
            checkins,
            workouts,
            quests,
            store_status,
        }
    }
}
