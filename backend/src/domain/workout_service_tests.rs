//! Tests for the workout logging service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockHunterRepository, MockWorkoutRepository, WorkoutRepositoryError};
use crate::domain::{
    Difficulty, ErrorCode, Hunter, HunterId, Progression, WorkoutMinutes, WorkoutRecord,
    WorkoutType,
};
use crate::test_support::{FixtureClock, hunter_with};

fn request(user_id: HunterId, minutes: i64, difficulty: Difficulty) -> LogWorkoutRequest {
    LogWorkoutRequest {
        user_id,
        workout_type: WorkoutType::new("run").expect("valid type"),
        minutes: WorkoutMinutes::new(minutes).expect("valid minutes"),
        difficulty,
    }
}

fn hunters_accepting(hunter: Hunter) -> MockHunterRepository {
    let mut repo = MockHunterRepository::new();
    let stored = hunter.clone();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_save_progress()
        .times(1)
        .return_once(move |_, _, update| Ok(hunter.with_progress(update)));
    repo
}

fn workouts_accepting(expected_exp: u64) -> MockWorkoutRepository {
    let mut repo = MockWorkoutRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(move |workout, _| workout.exp_awarded == expected_exp)
        .return_once(|workout, at| {
            Ok(WorkoutRecord {
                id: uuid::Uuid::new_v4(),
                user_id: workout.user_id,
                workout_type: workout.workout_type.clone(),
                minutes: workout.minutes,
                difficulty: workout.difficulty,
                exp_awarded: workout.exp_awarded,
                created_at: at,
                updated_at: at,
            })
        });
    repo
}

#[rstest]
#[case(Difficulty::Easy, 30, 30)]
#[case(Difficulty::Normal, 30, 45)]
#[case(Difficulty::Hard, 30, 60)]
#[tokio::test]
async fn awards_exp_by_difficulty(
    #[case] difficulty: Difficulty,
    #[case] minutes: i64,
    #[case] expected: u64,
) {
    let id = HunterId::random();
    let hunter = hunter_with(id, Progression::starting(), 0, None);
    let service = WorkoutService::new(
        Arc::new(hunters_accepting(hunter)),
        Arc::new(workouts_accepting(expected)),
        Arc::new(FixtureClock::march(10, 9)),
    );

    let response = service
        .log_workout(request(id, minutes, difficulty))
        .await
        .expect("workout logged");

    assert_eq!(response.exp_gain, expected);
    assert_eq!(response.exp, expected);
    assert!(!response.leveled_up);
}

#[rstest]
#[tokio::test]
async fn large_workout_crosses_levels_and_keeps_streak() {
    let id = HunterId::random();
    let hunter = hunter_with(id, Progression::starting(), 6, None);
    let mut hunters = MockHunterRepository::new();
    let stored = hunter.clone();
    hunters
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    hunters
        .expect_save_progress()
        .times(1)
        .withf(|_, _, update| update.streak == 6 && update.last_checkin.is_none())
        .return_once(move |_, _, update| Ok(hunter.with_progress(update)));

    let service = WorkoutService::new(
        Arc::new(hunters),
        Arc::new(workouts_accepting(600)),
        Arc::new(FixtureClock::march(10, 9)),
    );

    let response = service
        .log_workout(request(id, 300, Difficulty::Hard))
        .await
        .expect("workout logged");

    // 600 EXP: 100 to reach level 2, 282 to reach level 3, 218 left over.
    assert_eq!(response.level, 3);
    assert_eq!(response.exp, 218);
    assert!(response.leveled_up);
}

#[rstest]
#[tokio::test]
async fn missing_hunter_skips_workout_insert() {
    let mut hunters = MockHunterRepository::new();
    hunters.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut workouts = MockWorkoutRepository::new();
    workouts.expect_insert().times(0);

    let service = WorkoutService::new(
        Arc::new(hunters),
        Arc::new(workouts),
        Arc::new(FixtureClock::march(10, 9)),
    );

    let error = service
        .log_workout(request(HunterId::random(), 10, Difficulty::Easy))
        .await
        .expect_err("missing hunter");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn workout_history_failure_keeps_the_award() {
    let id = HunterId::random();
    let hunter = hunter_with(id, Progression::starting(), 0, None);
    let mut workouts = MockWorkoutRepository::new();
    workouts
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(WorkoutRepositoryError::query("constraint violated")));

    let service = WorkoutService::new(
        Arc::new(hunters_accepting(hunter)),
        Arc::new(workouts),
        Arc::new(FixtureClock::march(10, 9)),
    );

    let response = service
        .log_workout(request(id, 10, Difficulty::Normal))
        .await
        .expect("award stands without the history row");

    assert_eq!(
        response,
        LogWorkoutResponse {
            exp_gain: 15,
            level: 1,
            exp: 15,
            leveled_up: false,
        }
    );
}
