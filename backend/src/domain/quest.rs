//! Daily quest catalogue and records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::HunterId;

/// Description shared by every generated quest.
pub const QUEST_DESCRIPTION: &str = "Complete the task to earn EXP and keep your streak.";

/// A quest the generator can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub title: &'static str,
    pub exp_reward: u64,
}

/// Fixed catalogue sampled when a hunter has no quest for the day.
pub const QUEST_CATALOGUE: [QuestTemplate; 4] = [
    QuestTemplate {
        title: "Do 100 Push-ups",
        exp_reward: 75,
    },
    QuestTemplate {
        title: "Run 3 km",
        exp_reward: 90,
    },
    QuestTemplate {
        title: "Stretch for 10 minutes",
        exp_reward: 40,
    },
    QuestTemplate {
        title: "Hold a 2-minute plank",
        exp_reward: 60,
    },
];

/// Raised when a quest date is not formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date must be formatted as YYYY-MM-DD, got {0:?}")]
pub struct InvalidQuestDate(pub String);

/// UTC calendar day a quest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestDate(NaiveDate);

impl QuestDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// UTC day containing `now`.
    pub fn of(now: DateTime<Utc>) -> Self {
        Self(now.date_naive())
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for QuestDate {
    type Err = InvalidQuestDate;

    /// # Examples
    /// ```
    /// use hunter_backend::domain::QuestDate;
    ///
    /// let date: QuestDate = "2024-03-10".parse().unwrap();
    /// assert_eq!(date.to_string(), "2024-03-10");
    /// assert!("10/03/2024".parse::<QuestDate>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| InvalidQuestDate(s.to_owned()))
    }
}

impl fmt::Display for QuestDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Input for creating a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuest {
    pub user_id: HunterId,
    pub date: QuestDate,
    pub title: String,
    pub description: String,
    pub exp_reward: u64,
}

impl NewQuest {
    /// Build the day's quest from a catalogue template.
    pub fn from_template(user_id: HunterId, date: QuestDate, template: QuestTemplate) -> Self {
        Self {
            user_id,
            date,
            title: template.title.to_owned(),
            description: QUEST_DESCRIPTION.to_owned(),
            exp_reward: template.exp_reward,
        }
    }
}

/// A persisted daily quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: Uuid,
    pub user_id: HunterId,
    pub date: QuestDate,
    pub title: String,
    pub description: String,
    pub exp_reward: u64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
