//! Workout logging model and EXP rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HunterId;

/// Inclusive bounds for a logged workout's duration.
pub const WORKOUT_MINUTES_MIN: i64 = 1;
pub const WORKOUT_MINUTES_MAX: i64 = 300;

/// Validation errors for workout payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkoutValidationError {
    #[error("minutes must be between {min} and {max}, got {actual}")]
    MinutesOutOfRange { min: i64, max: i64, actual: i64 },
    #[error("workout_type must not be empty")]
    EmptyWorkoutType,
}

/// Effort level of a workout.
///
/// Unrecognised input is treated as [`Difficulty::Normal`] and stored in its
/// normalised form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Lenient parse used for client input.
    ///
    /// # Examples
    /// ```
    /// use hunter_backend::domain::Difficulty;
    ///
    /// assert_eq!(Difficulty::parse_lenient(Some("hard")), Difficulty::Hard);
    /// assert_eq!(Difficulty::parse_lenient(Some("brutal")), Difficulty::Normal);
    /// assert_eq!(Difficulty::parse_lenient(None), Difficulty::Normal);
    /// ```
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("easy") => Self::Easy,
            Some("hard") => Self::Hard,
            _ => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    /// Multiplier expressed in half steps (1.0 = 2, 1.5 = 3, 2.0 = 4).
    fn half_steps(self) -> u64 {
        match self {
            Self::Easy => 2,
            Self::Normal => 3,
            Self::Hard => 4,
        }
    }

    /// EXP awarded for `minutes` at this difficulty, floored.
    pub fn exp_for(self, minutes: WorkoutMinutes) -> u64 {
        u64::from(minutes.get()) * self.half_steps() / 2
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workout duration in minutes, within the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutMinutes(u16);

impl WorkoutMinutes {
    pub fn new(raw: i64) -> Result<Self, WorkoutValidationError> {
        if !(WORKOUT_MINUTES_MIN..=WORKOUT_MINUTES_MAX).contains(&raw) {
            return Err(WorkoutValidationError::MinutesOutOfRange {
                min: WORKOUT_MINUTES_MIN,
                max: WORKOUT_MINUTES_MAX,
                actual: raw,
            });
        }
        u16::try_from(raw)
            .map(Self)
            .map_err(|_| WorkoutValidationError::MinutesOutOfRange {
                min: WORKOUT_MINUTES_MIN,
                max: WORKOUT_MINUTES_MAX,
                actual: raw,
            })
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// Non-empty free-text workout category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutType(String);

impl WorkoutType {
    pub fn new(raw: impl Into<String>) -> Result<Self, WorkoutValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(WorkoutValidationError::EmptyWorkoutType);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Input for persisting a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub user_id: HunterId,
    pub workout_type: WorkoutType,
    pub minutes: WorkoutMinutes,
    pub difficulty: Difficulty,
    pub exp_awarded: u64,
}

/// A persisted workout log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: HunterId,
    pub workout_type: WorkoutType,
    pub minutes: WorkoutMinutes,
    pub difficulty: Difficulty,
    pub exp_awarded: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
