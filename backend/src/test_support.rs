//! Shared helpers for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl FixtureClock {
    /// Clock fixed at `hour:00` UTC on the given day of March 2024.
    pub(crate) fn march(day: u32, hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that tests move forward explicitly.
#[derive(Debug)]
pub(crate) struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(crate) fn starting_at(start: FixtureClock) -> Self {
        Self {
            now: Mutex::new(start.0),
        }
    }

    pub(crate) fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock lock");
        *now += Duration::days(days);
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Build a stored hunter with the given progress fields at revision 1.
pub(crate) fn hunter_with(
    id: crate::domain::HunterId,
    progression: crate::domain::Progression,
    streak: u32,
    last_checkin: Option<DateTime<Utc>>,
) -> crate::domain::Hunter {
    let created_at = FixtureClock::march(1, 0).0;
    crate::domain::Hunter::new(crate::domain::HunterDraft {
        id,
        name: crate::domain::HunterName::new("Sung Jinwoo").expect("valid name"),
        title: Some("Shadow Monarch".to_owned()),
        progression,
        streak,
        last_checkin,
        revision: 1,
        created_at,
        updated_at: created_at,
    })
    .expect("valid hunter")
}
