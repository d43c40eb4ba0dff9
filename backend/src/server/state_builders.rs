//! Builders for HTTP state ports over the selected store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use hunter_backend::domain::ports::{QuestSelector, RandomQuestSelector};
use hunter_backend::domain::{
    CheckinService, HunterService, QuestService, StoreStatus, StoreStatusService, WorkoutService,
};
use hunter_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hunter_backend::outbound::store::StorePorts;

use super::ServerConfig;

/// Wire every driving port to the services over `store`.
fn build_ports(
    store: &StorePorts,
    status: StoreStatus,
    selector: Arc<dyn QuestSelector>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    let hunters = Arc::new(HunterService::new(store.hunters.clone(), clock.clone()));
    HttpStatePorts {
        hunters: hunters.clone(),
        hunters_query: hunters,
        checkins: Arc::new(CheckinService::new(
            store.hunters.clone(),
            store.checkins.clone(),
            clock.clone(),
        )),
        workouts: Arc::new(WorkoutService::new(
            store.hunters.clone(),
            store.workouts.clone(),
            clock.clone(),
        )),
        quests: Arc::new(QuestService::new(
            store.hunters.clone(),
            store.quests.clone(),
            selector,
            clock,
        )),
        store_status: Arc::new(StoreStatusService::new(
            store.diagnostics.clone(),
            status,
        )),
    }
}

/// Build the shared HTTP state with the production clock and random quests.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = build_ports(
        &config.store,
        config.store_status.clone(),
        Arc::new(RandomQuestSelector),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_backend::domain::ports::{
        CreateHunterRequest, FixedQuestSelector, TodaysQuestRequest,
    };
    use hunter_backend::domain::{HunterName, NewHunter, QUEST_CATALOGUE, StoreKind};
    use hunter_backend::outbound::memory::InMemoryStore;
    use rstest::rstest;

    fn status() -> StoreStatus {
        StoreStatus {
            kind: StoreKind::InMemory,
            database_url_set: false,
            database_name_set: false,
            fallbacks: Vec::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn services_share_the_selected_store() {
        let store = StorePorts::from_shared(Arc::new(InMemoryStore::new()));
        let state = HttpState::new(build_ports(
            &store,
            status(),
            Arc::new(FixedQuestSelector(2)),
            Arc::new(DefaultClock),
        ));

        let created = state
            .hunters
            .create_hunter(CreateHunterRequest {
                hunter: NewHunter {
                    name: HunterName::new("Jinwoo").expect("valid name"),
                    title: None,
                },
            })
            .await
            .expect("hunter created");
        let quest = state
            .quests
            .todays_quest(TodaysQuestRequest {
                user_id: created.hunter.id(),
            })
            .await
            .expect("quest generated");

        assert_eq!(quest.title, QUEST_CATALOGUE[2].title);
        let roster = state.hunters_query.list_hunters().await.expect("roster");
        assert_eq!(roster.len(), 1);
        assert_eq!(state.store_status.report().await.status, status());
    }
}
