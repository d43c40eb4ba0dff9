//! Daily check-in rules and records.
//!
//! Calendar days are UTC days. A check-in on the day after the previous one
//! extends the streak; any other gap starts a new streak at one.

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use super::HunterId;

/// Streak length at which the check-in bonus stops growing.
pub const STREAK_BONUS_CAP: u32 = 20;

/// Base EXP granted by every completed check-in.
pub const CHECKIN_BASE_EXP: u64 = 10;

/// What a check-in request should do given the hunter's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinDecision {
    /// The hunter already checked in on this UTC day.
    AlreadyCheckedIn,
    /// Record a check-in with the new streak and EXP gain.
    Advance { streak: u32, exp_gain: u64 },
}

/// EXP earned by a check-in that leaves the hunter on `streak`.
///
/// # Examples
/// ```
/// use hunter_backend::domain::checkin_exp;
///
/// assert_eq!(checkin_exp(1), 11);
/// assert_eq!(checkin_exp(45), 30);
/// ```
pub fn checkin_exp(streak: u32) -> u64 {
    CHECKIN_BASE_EXP + u64::from(streak.min(STREAK_BONUS_CAP))
}

/// Decide the outcome of a check-in made at `now`.
pub fn decide_checkin(
    last_checkin: Option<DateTime<Utc>>,
    current_streak: u32,
    now: DateTime<Utc>,
) -> CheckinDecision {
    let today = now.date_naive();
    let yesterday = today.checked_sub_days(Days::new(1));

    let streak = match last_checkin.map(|at| at.date_naive()) {
        Some(last) if last == today => return CheckinDecision::AlreadyCheckedIn,
        Some(last) if Some(last) == yesterday => current_streak.saturating_add(1),
        _ => 1,
    };

    CheckinDecision::Advance {
        streak,
        exp_gain: checkin_exp(streak),
    }
}

/// Input for persisting a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckin {
    pub user_id: HunterId,
    pub date: NaiveDate,
    pub streak_after: u32,
}

/// A persisted check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinRecord {
    pub id: Uuid,
    pub user_id: HunterId,
    pub date: NaiveDate,
    pub streak_after: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
