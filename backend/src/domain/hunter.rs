//! Hunter data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Progression;

/// Validation errors raised while building hunters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HunterValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("revision must be at least 1")]
    InvalidRevision,
}

/// Stable hunter identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HunterId(Uuid);

impl HunterId {
    /// Parse a hunter identifier from client input.
    ///
    /// # Examples
    /// ```
    /// use hunter_backend::domain::HunterId;
    ///
    /// assert!(HunterId::parse("not-a-uuid").is_err());
    /// assert!(HunterId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, HunterValidationError> {
        let raw = raw.as_ref();
        if raw.trim() != raw {
            return Err(HunterValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| HunterValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HunterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty hunter display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HunterName(String);

impl HunterName {
    pub fn new(name: impl Into<String>) -> Result<Self, HunterValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HunterValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for HunterName {
    type Error = HunterValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HunterName> for String {
    fn from(value: HunterName) -> Self {
        value.0
    }
}

/// Input for creating a hunter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHunter {
    pub name: HunterName,
    pub title: Option<String>,
}

/// Raw fields used to rebuild a stored hunter.
#[derive(Debug, Clone)]
pub struct HunterDraft {
    pub id: HunterId,
    pub name: HunterName,
    pub title: Option<String>,
    pub progression: Progression,
    pub streak: u32,
    pub last_checkin: Option<DateTime<Utc>>,
    pub revision: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A player of the fitness game.
///
/// ## Invariants
/// - `revision` starts at 1 and increases by one on every progress write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunter {
    id: HunterId,
    name: HunterName,
    title: Option<String>,
    progression: Progression,
    streak: u32,
    last_checkin: Option<DateTime<Utc>>,
    revision: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Hunter {
    pub fn new(draft: HunterDraft) -> Result<Self, HunterValidationError> {
        if draft.revision == 0 {
            return Err(HunterValidationError::InvalidRevision);
        }
        Ok(Self {
            id: draft.id,
            name: draft.name,
            title: draft.title,
            progression: draft.progression,
            streak: draft.streak,
            last_checkin: draft.last_checkin,
            revision: draft.revision,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Build a freshly created hunter at level one.
    pub fn create(id: HunterId, input: NewHunter, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            title: input.title,
            progression: Progression::starting(),
            streak: 0,
            last_checkin: None,
            revision: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a progress update, bumping the revision.
    pub fn with_progress(mut self, update: &HunterProgressUpdate) -> Self {
        self.progression = update.progression;
        self.streak = update.streak;
        self.last_checkin = update.last_checkin;
        self.updated_at = update.updated_at;
        self.revision = self.revision.saturating_add(1);
        self
    }

    pub fn id(&self) -> HunterId {
        self.id
    }

    pub fn name(&self) -> &HunterName {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_checkin(&self) -> Option<DateTime<Utc>> {
        self.last_checkin
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Progress fields written back by a compare-and-swap update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunterProgressUpdate {
    pub progression: Progression,
    pub streak: u32,
    pub last_checkin: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl HunterProgressUpdate {
    /// Carry the hunter's streak and check-in forward with a new progression.
    pub fn progression_only(hunter: &Hunter, progression: Progression, now: DateTime<Utc>) -> Self {
        Self {
            progression,
            streak: hunter.streak(),
            last_checkin: hunter.last_checkin(),
            updated_at: now,
        }
    }
}
