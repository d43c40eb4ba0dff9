//! Tests for daily quest generation and completion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    FixedQuestSelector, HunterRepositoryError, MockHunterRepository, MockQuestRepository,
    MockQuestSelector,
};
use crate::domain::{
    ErrorCode, Hunter, HunterId, Level, Progression, QUEST_CATALOGUE, QUEST_DESCRIPTION,
};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::{FixtureClock, hunter_with};

fn clock() -> FixtureClock {
    FixtureClock::march(10, 9)
}

fn quest_for(user_id: HunterId, date: QuestDate, reward: u64, completed: bool) -> Quest {
    let at = clock().0;
    Quest {
        id: Uuid::new_v4(),
        user_id,
        date,
        title: "Run 3 km".to_owned(),
        description: QUEST_DESCRIPTION.to_owned(),
        exp_reward: reward,
        completed,
        created_at: at,
        updated_at: at,
    }
}

fn stored_quest(input: &NewQuest, at: DateTime<Utc>) -> Quest {
    Quest {
        id: Uuid::new_v4(),
        user_id: input.user_id,
        date: input.date,
        title: input.title.clone(),
        description: input.description.clone(),
        exp_reward: input.exp_reward,
        completed: false,
        created_at: at,
        updated_at: at,
    }
}

fn hunters_with_lookup(hunter: Hunter, lookups: usize) -> MockHunterRepository {
    let mut repo = MockHunterRepository::new();
    repo.expect_find_by_id()
        .times(lookups)
        .returning(move |_| Ok(Some(hunter.clone())));
    repo
}

fn service(
    hunters: MockHunterRepository,
    quests: MockQuestRepository,
    selector: Arc<dyn QuestSelector>,
) -> QuestService<MockHunterRepository, MockQuestRepository> {
    QuestService::new(
        Arc::new(hunters),
        Arc::new(quests),
        selector,
        Arc::new(clock()),
    )
}

#[rstest]
#[tokio::test]
async fn todays_quest_returns_existing_quest() {
    let id = HunterId::random();
    let today = QuestDate::of(clock().0);
    let existing = quest_for(id, today, 90, false);
    let expected = existing.clone();

    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .withf(move |_, date| *date == today)
        .return_once(move |_, _| Ok(Some(existing)));
    quests.expect_insert_if_absent().times(0);
    let mut selector = MockQuestSelector::new();
    selector.expect_pick().times(0);

    let quest = service(
        hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1),
        quests,
        Arc::new(selector),
    )
    .todays_quest(TodaysQuestRequest { user_id: id })
    .await
    .expect("quest returned");

    assert_eq!(quest, expected);
}

#[rstest]
#[tokio::test]
async fn todays_quest_generates_from_selector() {
    let id = HunterId::random();
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(|_, _| Ok(None));
    quests
        .expect_insert_if_absent()
        .times(1)
        .return_once(|input, at| Ok(stored_quest(input, at)));

    let quest = service(
        hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1),
        quests,
        Arc::new(FixedQuestSelector(2)),
    )
    .todays_quest(TodaysQuestRequest { user_id: id })
    .await
    .expect("quest generated");

    assert_eq!(quest.title, "Stretch for 10 minutes");
    assert_eq!(quest.exp_reward, 40);
    assert_eq!(quest.date.to_string(), "2024-03-10");
    assert!(!quest.completed);
}

#[rstest]
#[tokio::test]
async fn todays_quest_requires_hunter() {
    let mut hunters = MockHunterRepository::new();
    hunters.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut quests = MockQuestRepository::new();
    quests.expect_find_for_day().times(0);

    let error = service(hunters, quests, Arc::new(FixedQuestSelector(0)))
        .todays_quest(TodaysQuestRequest {
            user_id: HunterId::random(),
        })
        .await
        .expect_err("missing hunter");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn complete_quest_awards_reward_once() {
    let id = HunterId::random();
    let today = QuestDate::of(clock().0);
    let hunter = hunter_with(id, Progression::from_parts(Level::FIRST, 50), 2, None);
    let quest = quest_for(id, today, 60, false);
    let quest_id = quest.id;

    let mut hunters = hunters_with_lookup(hunter.clone(), 2);
    hunters
        .expect_save_progress()
        .times(1)
        .withf(|_, _, update| update.streak == 2)
        .return_once(move |_, _, update| Ok(hunter.with_progress(update)));
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(move |_, _| Ok(Some(quest)));
    quests
        .expect_mark_completed()
        .times(1)
        .withf(move |id, _| *id == quest_id)
        .return_once(|_, _| Ok(true));

    let completion = service(hunters, quests, Arc::new(FixedQuestSelector(0)))
        .complete_quest(CompleteQuestRequest {
            user_id: id,
            date: None,
        })
        .await
        .expect("quest completed");

    assert_eq!(
        completion,
        QuestCompletion::Completed {
            reward: 60,
            level: 2,
            exp: 10,
            leveled_up: true,
        }
    );
}

#[rstest]
#[tokio::test]
async fn completed_quest_is_reported_without_award() {
    let id = HunterId::random();
    let date: QuestDate = "2024-03-08".parse().expect("valid date");
    let quest = quest_for(id, date, 75, true);

    let mut hunters = hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1);
    hunters.expect_save_progress().times(0);
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .withf(move |_, d| *d == date)
        .return_once(move |_, _| Ok(Some(quest)));
    quests.expect_mark_completed().times(0);

    let completion = service(hunters, quests, Arc::new(FixedQuestSelector(0)))
        .complete_quest(CompleteQuestRequest {
            user_id: id,
            date: Some(date),
        })
        .await
        .expect("already completed");

    assert_eq!(completion, QuestCompletion::AlreadyCompleted { reward: 75 });
}

#[rstest]
#[tokio::test]
async fn losing_completion_race_awards_nothing() {
    let id = HunterId::random();
    let quest = quest_for(id, QuestDate::of(clock().0), 90, false);

    let mut hunters = hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1);
    hunters.expect_save_progress().times(0);
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(move |_, _| Ok(Some(quest)));
    quests
        .expect_mark_completed()
        .times(1)
        .return_once(|_, _| Ok(false));

    let completion = service(hunters, quests, Arc::new(FixedQuestSelector(0)))
        .complete_quest(CompleteQuestRequest {
            user_id: id,
            date: None,
        })
        .await
        .expect("race lost");

    assert_eq!(completion, QuestCompletion::AlreadyCompleted { reward: 90 });
}

#[rstest]
#[tokio::test]
async fn missing_quest_is_not_found() {
    let id = HunterId::random();
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(
        hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1),
        quests,
        Arc::new(FixedQuestSelector(0)),
    )
    .complete_quest(CompleteQuestRequest {
        user_id: id,
        date: None,
    })
    .await
    .expect_err("no quest");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Quest not found for today");
}

#[rstest]
#[tokio::test]
async fn missing_quest_on_explicit_date_names_that_date() {
    let id = HunterId::random();
    let date: QuestDate = "2024-03-08".parse().expect("valid date");
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(
        hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1),
        quests,
        Arc::new(FixedQuestSelector(0)),
    )
    .complete_quest(CompleteQuestRequest {
        user_id: id,
        date: Some(date),
    })
    .await
    .expect_err("no quest");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Quest not found for 2024-03-08");
}

#[rstest]
#[tokio::test]
async fn contended_award_reopens_quest_so_a_retry_is_rewarded() {
    let id = HunterId::random();
    let hunter = hunter_with(id, Progression::starting(), 0, None);
    let store = Arc::new(InMemoryStore::new());
    let today = QuestDate::of(clock().0);
    store
        .insert_if_absent(
            &NewQuest::from_template(id, today, QUEST_CATALOGUE[1]),
            clock().0,
        )
        .await
        .expect("quest stored");

    let mut contended = hunters_with_lookup(hunter.clone(), 4);
    contended
        .expect_save_progress()
        .times(3)
        .returning(|_, _, _| Err(HunterRepositoryError::revision_mismatch(1_u32, 2_u32)));
    let first = QuestService::new(
        Arc::new(contended),
        store.clone(),
        Arc::new(FixedQuestSelector(0)),
        Arc::new(clock()),
    );
    let request = CompleteQuestRequest {
        user_id: id,
        date: None,
    };

    let error = first
        .complete_quest(request)
        .await
        .expect_err("award exhausted its attempts");
    assert_eq!(error.code(), ErrorCode::Conflict);
    let stored = store
        .find_for_day(&id, today)
        .await
        .expect("lookup")
        .expect("quest kept");
    assert!(!stored.completed);

    let mut settled = hunters_with_lookup(hunter.clone(), 2);
    settled
        .expect_save_progress()
        .times(1)
        .return_once(move |_, _, update| Ok(hunter.with_progress(update)));
    let retry = QuestService::new(
        Arc::new(settled),
        store.clone(),
        Arc::new(FixedQuestSelector(0)),
        Arc::new(clock()),
    );
    let completion = retry
        .complete_quest(request)
        .await
        .expect("retry rewarded");

    assert_eq!(
        completion,
        QuestCompletion::Completed {
            reward: 90,
            level: 1,
            exp: 90,
            leveled_up: false,
        }
    );
}

#[rstest]
#[tokio::test]
async fn award_store_failure_reopens_quest_and_surfaces_error() {
    let id = HunterId::random();
    let quest = quest_for(id, QuestDate::of(clock().0), 40, false);
    let quest_id = quest.id;

    let mut hunters = hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 2);
    hunters
        .expect_save_progress()
        .times(1)
        .return_once(|_, _, _| Err(HunterRepositoryError::connection("pool exhausted")));
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(move |_, _| Ok(Some(quest)));
    quests
        .expect_mark_completed()
        .times(1)
        .return_once(|_, _| Ok(true));
    quests
        .expect_reopen()
        .times(1)
        .withf(move |id, _| *id == quest_id)
        .return_once(|_, _| Ok(true));

    let error = service(hunters, quests, Arc::new(FixedQuestSelector(0)))
        .complete_quest(CompleteQuestRequest {
            user_id: id,
            date: None,
        })
        .await
        .expect_err("award failed");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn quest_store_outage_is_service_unavailable() {
    let id = HunterId::random();
    let mut quests = MockQuestRepository::new();
    quests
        .expect_find_for_day()
        .times(1)
        .return_once(|_, _| Err(QuestRepositoryError::connection("refused")));

    let error = service(
        hunters_with_lookup(hunter_with(id, Progression::starting(), 0, None), 1),
        quests,
        Arc::new(FixedQuestSelector(0)),
    )
    .todays_quest(TodaysQuestRequest { user_id: id })
    .await
    .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
