//! Internal Diesel row structs and their conversions to domain types.
//!
//! These types never leave the persistence layer. Conversions from rows are
//! fallible because the database stores signed integers while the domain
//! uses unsigned ones; a row that does not fit is reported as a query error.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::Text;
use uuid::Uuid;

use crate::domain::{
    CheckinRecord, Difficulty, Hunter, HunterDraft, HunterId, HunterName, Level, Progression,
    Quest, QuestDate, WorkoutMinutes, WorkoutRecord, WorkoutType,
};

use super::schema::{checkins, hunters, quests, workouts};

/// A stored value that cannot be represented by the domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {field} is out of range: {detail}")]
pub(crate) struct RowConversionError {
    field: &'static str,
    detail: String,
}

impl RowConversionError {
    fn new(field: &'static str, detail: impl ToString) -> Self {
        Self {
            field,
            detail: detail.to_string(),
        }
    }
}

pub(crate) fn to_db_i32(field: &'static str, value: u32) -> Result<i32, RowConversionError> {
    i32::try_from(value).map_err(|err| RowConversionError::new(field, err))
}

pub(crate) fn to_db_i64(field: &'static str, value: u64) -> Result<i64, RowConversionError> {
    i64::try_from(value).map_err(|err| RowConversionError::new(field, err))
}

fn from_db_u32(field: &'static str, value: i32) -> Result<u32, RowConversionError> {
    u32::try_from(value).map_err(|err| RowConversionError::new(field, err))
}

fn from_db_u64(field: &'static str, value: i64) -> Result<u64, RowConversionError> {
    u64::try_from(value).map_err(|err| RowConversionError::new(field, err))
}

// ---------------------------------------------------------------------------
// Hunters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hunters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HunterRow {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub level: i32,
    pub exp: i64,
    pub streak: i32,
    pub last_checkin: Option<DateTime<Utc>>,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hunters)]
pub(crate) struct NewHunterRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub title: Option<&'a str>,
    pub level: i32,
    pub exp: i64,
    pub streak: i32,
    pub last_checkin: Option<DateTime<Utc>>,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<HunterRow> for Hunter {
    type Error = RowConversionError;

    fn try_from(row: HunterRow) -> Result<Self, Self::Error> {
        let level = Level::new(from_db_u32("level", row.level)?)
            .map_err(|err| RowConversionError::new("level", err))?;
        let progression = Progression::from_parts(level, from_db_u64("exp", row.exp)?);
        let name = HunterName::new(row.name).map_err(|err| RowConversionError::new("name", err))?;

        Hunter::new(HunterDraft {
            id: HunterId::from_uuid(row.id),
            name,
            title: row.title,
            progression,
            streak: from_db_u32("streak", row.streak)?,
            last_checkin: row.last_checkin,
            revision: from_db_u32("revision", row.revision)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .map_err(|err| RowConversionError::new("revision", err))
    }
}

// ---------------------------------------------------------------------------
// Workouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workouts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WorkoutRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_type: String,
    pub minutes: i32,
    pub difficulty: String,
    pub exp_awarded: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workouts)]
pub(crate) struct NewWorkoutRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_type: &'a str,
    pub minutes: i32,
    pub difficulty: &'a str,
    pub exp_awarded: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<WorkoutRow> for WorkoutRecord {
    type Error = RowConversionError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        Ok(WorkoutRecord {
            id: row.id,
            user_id: HunterId::from_uuid(row.user_id),
            workout_type: WorkoutType::new(row.workout_type)
                .map_err(|err| RowConversionError::new("workout_type", err))?,
            minutes: WorkoutMinutes::new(i64::from(row.minutes))
                .map_err(|err| RowConversionError::new("minutes", err))?,
            difficulty: Difficulty::parse_lenient(Some(row.difficulty.as_str())),
            exp_awarded: from_db_u64("exp_awarded", row.exp_awarded)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quest_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub exp_reward: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quests)]
pub(crate) struct NewQuestRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quest_date: NaiveDate,
    pub title: &'a str,
    pub description: &'a str,
    pub exp_reward: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<QuestRow> for Quest {
    type Error = RowConversionError;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        Ok(Quest {
            id: row.id,
            user_id: HunterId::from_uuid(row.user_id),
            date: QuestDate::from_naive(row.quest_date),
            title: row.title,
            description: row.description,
            exp_reward: from_db_u64("exp_reward", row.exp_reward)?,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = checkins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheckinRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub checkin_date: NaiveDate,
    pub streak_after: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = checkins)]
pub(crate) struct NewCheckinRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub checkin_date: NaiveDate,
    pub streak_after: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CheckinRow> for CheckinRecord {
    type Error = RowConversionError;

    fn try_from(row: CheckinRow) -> Result<Self, Self::Error> {
        Ok(CheckinRecord {
            id: row.id,
            user_id: HunterId::from_uuid(row.user_id),
            date: row.checkin_date,
            streak_after: from_db_u32("streak_after", row.streak_after)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// One row of the `information_schema.tables` probe.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct TableNameRow {
    #[diesel(sql_type = Text)]
    pub table_name: String,
}
