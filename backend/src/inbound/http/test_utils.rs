//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::Clock;
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{FixedQuestSelector, HunterRepository};
use crate::domain::{
    CheckinService, Hunter, HunterName, HunterService, NewHunter, QuestService, StoreKind,
    StoreStatus, StoreStatusService, WorkoutService,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Handler state wired to a fresh in-memory store.
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub state: HttpState,
}

impl TestWorld {
    /// Insert a hunter directly into the store.
    pub async fn seed_hunter(&self, name: &str, now: chrono::DateTime<chrono::Utc>) -> Hunter {
        let input = NewHunter {
            name: HunterName::new(name).expect("valid name"),
            title: None,
        };
        self.store.create(&input, now).await.expect("seed hunter")
    }
}

/// Build handler state over an in-memory store.
///
/// `quest_index` picks the catalogue entry handed out by the quest generator.
pub fn in_memory_world(clock: Arc<dyn Clock>, quest_index: usize) -> TestWorld {
    let store = Arc::new(InMemoryStore::new());
    let hunters = Arc::new(HunterService::new(store.clone(), clock.clone()));
    let status = StoreStatus {
        kind: StoreKind::InMemory,
        database_url_set: false,
        database_name_set: false,
        fallbacks: Vec::new(),
    };
    let state = HttpState::new(HttpStatePorts {
        hunters: hunters.clone(),
        hunters_query: hunters,
        checkins: Arc::new(CheckinService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        workouts: Arc::new(WorkoutService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        )),
        quests: Arc::new(QuestService::new(
            store.clone(),
            store.clone(),
            Arc::new(FixedQuestSelector(quest_index)),
            clock,
        )),
        store_status: Arc::new(StoreStatusService::new(store.clone(), status)),
    });
    TestWorld { store, state }
}

/// Application with every API route, trace middleware and extractor config.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// Read a string field from a JSON body.
pub fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// Read an unsigned integer field from a JSON body.
pub fn u64_field(body: &Value, key: &str) -> Option<u64> {
    body.get(key).and_then(Value::as_u64)
}
