//! Driving port for daily check-ins.

use async_trait::async_trait;

use crate::domain::{Error, HunterId};

/// Request to check a hunter in for the current UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinRequest {
    pub user_id: HunterId,
}

/// Outcome of a check-in request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// The hunter had already checked in today; nothing changed.
    AlreadyCheckedIn { streak: u32, level: u32, exp: u64 },
    /// A new check-in was recorded.
    Completed {
        exp_gain: u64,
        streak: u32,
        level: u32,
        exp: u64,
        leveled_up: bool,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinCommand: Send + Sync {
    async fn check_in(&self, request: CheckinRequest) -> Result<CheckinOutcome, Error>;
}
