//! Compare-and-swap loop shared by every use case that awards EXP.
//!
//! Each attempt re-reads the hunter, asks the caller to plan a write from
//! that snapshot and submits it against the snapshot's revision. Losing the
//! race re-plans from fresh state; store failures are surfaced immediately.

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{HunterRepository, HunterRepositoryError};
use crate::domain::{Error, Hunter, HunterId, HunterProgressUpdate};

/// Attempts made before a contended write is reported as a conflict.
pub(crate) const MAX_PROGRESS_ATTEMPTS: u32 = 3;

/// What to do with the hunter snapshot read by the current attempt.
pub(crate) enum ProgressPlan<T> {
    /// Leave the hunter untouched and return `T`.
    Skip(T),
    /// Write the update, then return `T` alongside the stored hunter.
    Write(HunterProgressUpdate, T),
}

pub(crate) fn hunter_not_found() -> Error {
    Error::not_found("Hunter not found")
}

pub(crate) fn map_hunter_repository_error(error: HunterRepositoryError) -> Error {
    match error {
        HunterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hunter repository unavailable: {message}"))
        }
        HunterRepositoryError::Query { message } => {
            Error::internal(format!("hunter repository error: {message}"))
        }
        HunterRepositoryError::RevisionMismatch { expected, actual } => {
            Error::conflict("hunter was modified concurrently").with_details(json!({
                "expected_revision": expected,
                "actual_revision": actual,
            }))
        }
        HunterRepositoryError::NotFound { .. } => hunter_not_found(),
    }
}

/// Fetch a hunter or fail with 404.
pub(crate) async fn require_hunter<R>(repo: &R, id: &HunterId) -> Result<Hunter, Error>
where
    R: HunterRepository + ?Sized,
{
    repo.find_by_id(id)
        .await
        .map_err(map_hunter_repository_error)?
        .ok_or_else(hunter_not_found)
}

/// Run `plan` against fresh hunter snapshots until a write lands.
pub(crate) async fn write_progress<R, T, F>(
    repo: &R,
    id: &HunterId,
    mut plan: F,
) -> Result<(Hunter, T), Error>
where
    R: HunterRepository + ?Sized,
    F: FnMut(&Hunter) -> ProgressPlan<T> + Send,
    T: Send,
{
    for attempt in 1..=MAX_PROGRESS_ATTEMPTS {
        let hunter = require_hunter(repo, id).await?;
        let (update, value) = match plan(&hunter) {
            ProgressPlan::Skip(value) => return Ok((hunter, value)),
            ProgressPlan::Write(update, value) => (update, value),
        };

        match repo.save_progress(id, hunter.revision(), &update).await {
            Ok(saved) => return Ok((saved, value)),
            Err(HunterRepositoryError::RevisionMismatch { expected, actual }) => {
                warn!(
                    hunter_id = %id,
                    attempt,
                    expected,
                    actual,
                    "hunter progress write lost a revision race"
                );
            }
            Err(other) => return Err(map_hunter_repository_error(other)),
        }
    }

    Err(
        Error::conflict("hunter progress changed concurrently, please retry").with_details(
            json!({ "hunter_id": id.to_string(), "attempts": MAX_PROGRESS_ATTEMPTS }),
        ),
    )
}

#[cfg(test)]
mod tests {
    //! Retry behaviour of the compare-and-swap loop.
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockHunterRepository;
    use crate::domain::{ErrorCode, HunterName, NewHunter, Progression};

    fn hunter_at(id: HunterId, revision: u32) -> Hunter {
        let now = Utc::now();
        let mut hunter = Hunter::create(
            id,
            NewHunter {
                name: HunterName::new("Jinwoo").expect("valid name"),
                title: None,
            },
            now,
        );
        let update = HunterProgressUpdate::progression_only(&hunter, hunter.progression(), now);
        for _ in 1..revision {
            hunter = hunter.with_progress(&update);
        }
        hunter
    }

    fn gain_plan(hunter: &Hunter) -> ProgressPlan<()> {
        let progression = hunter.progression().gain(10).progression;
        ProgressPlan::Write(
            HunterProgressUpdate::progression_only(hunter, progression, Utc::now()),
            (),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn retries_after_revision_mismatch() {
        let id = HunterId::random();
        let reads = Arc::new(AtomicU32::new(0));
        let reads_in_mock = Arc::clone(&reads);

        let mut repo = MockHunterRepository::new();
        repo.expect_find_by_id().times(2).returning(move |_| {
            let revision = reads_in_mock.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Some(hunter_at(id, revision)))
        });
        repo.expect_save_progress()
            .times(1)
            .withf(|_, expected, _| *expected == 1)
            .return_once(|_, _, _| Err(HunterRepositoryError::revision_mismatch(1_u32, 2_u32)));
        repo.expect_save_progress()
            .times(1)
            .withf(|_, expected, _| *expected == 2)
            .return_once(move |_, _, update| Ok(hunter_at(id, 2).with_progress(update)));

        let (saved, ()) = write_progress(&repo, &id, gain_plan)
            .await
            .expect("second attempt succeeds");

        assert_eq!(reads.load(Ordering::SeqCst), 2);
        assert_eq!(saved.revision(), 3);
        assert_eq!(saved.progression(), Progression::starting().gain(10).progression);
    }

    #[rstest]
    #[tokio::test]
    async fn gives_up_with_conflict_after_max_attempts() {
        let id = HunterId::random();
        let mut repo = MockHunterRepository::new();
        repo.expect_find_by_id()
            .times(MAX_PROGRESS_ATTEMPTS as usize)
            .returning(move |_| Ok(Some(hunter_at(id, 1))));
        repo.expect_save_progress()
            .times(MAX_PROGRESS_ATTEMPTS as usize)
            .returning(|_, _, _| Err(HunterRepositoryError::revision_mismatch(1_u32, 2_u32)));

        let error = write_progress(&repo, &id, gain_plan)
            .await
            .expect_err("contention exhausts retries");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn skip_plans_do_not_write() {
        let id = HunterId::random();
        let mut repo = MockHunterRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(hunter_at(id, 4))));
        repo.expect_save_progress().times(0);

        let (hunter, value) = write_progress(&repo, &id, |_| ProgressPlan::Skip(7_u8))
            .await
            .expect("skip succeeds");

        assert_eq!(value, 7);
        assert_eq!(hunter.revision(), 4);
    }

    #[rstest]
    #[case(HunterRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(HunterRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(HunterRepositoryError::not_found("gone"), ErrorCode::NotFound)]
    #[tokio::test]
    async fn store_errors_are_not_retried(
        #[case] failure: HunterRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let id = HunterId::random();
        let mut repo = MockHunterRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(hunter_at(id, 1))));
        repo.expect_save_progress()
            .times(1)
            .return_once(move |_, _, _| Err(failure));

        let error = write_progress(&repo, &id, gain_plan)
            .await
            .expect_err("store failure surfaces");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_hunter_is_not_found() {
        let mut repo = MockHunterRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = write_progress(&repo, &HunterId::random(), gain_plan)
            .await
            .expect_err("absent hunter");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Hunter not found");
    }
}
