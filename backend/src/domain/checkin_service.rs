//! Daily check-in service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::hunter_progress::{ProgressPlan, write_progress};
use crate::domain::ports::{
    CheckinCommand, CheckinOutcome, CheckinRepository, CheckinRequest, HunterRepository,
};
use crate::domain::{CheckinDecision, Error, HunterProgressUpdate, NewCheckin, decide_checkin};

/// Service implementing [`CheckinCommand`].
#[derive(Clone)]
pub struct CheckinService<H: ?Sized, C: ?Sized> {
    hunter_repo: Arc<H>,
    checkin_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<H: ?Sized, C: ?Sized> CheckinService<H, C> {
    pub fn new(hunter_repo: Arc<H>, checkin_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            hunter_repo,
            checkin_repo,
            clock,
        }
    }
}

/// Values carried out of the compare-and-swap loop for a recorded check-in.
struct Recorded {
    exp_gain: u64,
    leveled_up: bool,
}

#[async_trait]
impl<H, C> CheckinCommand for CheckinService<H, C>
where
    H: HunterRepository + ?Sized,
    C: CheckinRepository + ?Sized,
{
    async fn check_in(&self, request: CheckinRequest) -> Result<CheckinOutcome, Error> {
        let now = self.clock.utc();

        let (hunter, recorded) =
            write_progress(self.hunter_repo.as_ref(), &request.user_id, |hunter| {
                match decide_checkin(hunter.last_checkin(), hunter.streak(), now) {
                    CheckinDecision::AlreadyCheckedIn => ProgressPlan::Skip(None),
                    CheckinDecision::Advance { streak, exp_gain } => {
                        let outcome = hunter.progression().gain(exp_gain);
                        let update = HunterProgressUpdate {
                            progression: outcome.progression,
                            streak,
                            last_checkin: Some(now),
                            updated_at: now,
                        };
                        ProgressPlan::Write(
                            update,
                            Some(Recorded {
                                exp_gain,
                                leveled_up: outcome.leveled_up(),
                            }),
                        )
                    }
                }
            })
            .await?;

        let progression = hunter.progression();
        let Some(recorded) = recorded else {
            return Ok(CheckinOutcome::AlreadyCheckedIn {
                streak: hunter.streak(),
                level: progression.level().get(),
                exp: progression.exp(),
            });
        };

        // The hunter row is authoritative; the check-in row is history only.
        if let Err(error) = self
            .checkin_repo
            .insert(
                &NewCheckin {
                    user_id: hunter.id(),
                    date: now.date_naive(),
                    streak_after: hunter.streak(),
                },
                now,
            )
            .await
        {
            warn!(
                hunter_id = %hunter.id(),
                error = %error,
                "check-in awarded but its history row was not stored"
            );
        }

        info!(
            hunter_id = %hunter.id(),
            streak = hunter.streak(),
            exp_gain = recorded.exp_gain,
            "check-in recorded"
        );

        Ok(CheckinOutcome::Completed {
            exp_gain: recorded.exp_gain,
            streak: hunter.streak(),
            level: progression.level().get(),
            exp: progression.exp(),
            leveled_up: recorded.leveled_up,
        })
    }
}

#[cfg(test)]
#[path = "checkin_service_tests.rs"]
mod tests;
