//! Tests for the hunter roster and profile service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{HunterRepositoryError, MockHunterRepository};
use crate::domain::{ErrorCode, HunterId, HunterName, NewHunter};
use crate::test_support::FixtureClock;

#[fixture]
fn now() -> DateTime<Utc> {
    FixtureClock::march(1, 8).0
}

fn new_hunter(name: &str) -> NewHunter {
    NewHunter {
        name: HunterName::new(name).expect("valid name"),
        title: Some("E-Rank".to_owned()),
    }
}

fn service(repo: MockHunterRepository, now: DateTime<Utc>) -> HunterService<MockHunterRepository> {
    HunterService::new(Arc::new(repo), Arc::new(FixtureClock(now)))
}

#[rstest]
#[tokio::test]
async fn create_hunter_stamps_clock_time(now: DateTime<Utc>) {
    let mut repo = MockHunterRepository::new();
    repo.expect_create()
        .times(1)
        .withf(move |_, at| *at == now)
        .return_once(|input, at| Ok(Hunter::create(HunterId::random(), input.clone(), at)));

    let response = service(repo, now)
        .create_hunter(CreateHunterRequest {
            hunter: new_hunter("Jinwoo"),
        })
        .await
        .expect("hunter created");

    assert_eq!(response.hunter.name().as_str(), "Jinwoo");
    assert_eq!(response.hunter.created_at(), now);
    assert_eq!(response.hunter.progression().level().get(), 1);
}

#[rstest]
#[tokio::test]
async fn list_hunters_requests_bounded_page(now: DateTime<Utc>) {
    let mut repo = MockHunterRepository::new();
    repo.expect_list()
        .times(1)
        .withf(|limit| *limit == HUNTER_LIST_LIMIT)
        .return_once(|_| Ok(Vec::new()));

    let hunters = service(repo, now).list_hunters().await.expect("listed");
    assert!(hunters.is_empty());
}

#[rstest]
#[tokio::test]
async fn profile_reports_missing_hunter(now: DateTime<Utc>) {
    let mut repo = MockHunterRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo, now)
        .profile(ProfileRequest {
            user_id: HunterId::random(),
        })
        .await
        .expect_err("missing hunter");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn profile_summarises_progress(now: DateTime<Utc>) {
    let id = HunterId::random();
    let mut repo = MockHunterRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(Hunter::create(id, new_hunter("Jinho"), now))));

    let profile = service(repo, now)
        .profile(ProfileRequest { user_id: id })
        .await
        .expect("profile");

    assert_eq!(profile.id, id);
    assert_eq!(profile.exp_to_next, 100);
    assert_eq!(profile.progress_pct, 0);
}

#[rstest]
#[case(HunterRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(HunterRepositoryError::query("broken"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_hunters_maps_repository_errors(
    now: DateTime<Utc>,
    #[case] failure: HunterRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockHunterRepository::new();
    repo.expect_list().times(1).return_once(move |_| Err(failure));

    let error = service(repo, now).list_hunters().await.expect_err("failure");
    assert_eq!(error.code(), expected);
}
