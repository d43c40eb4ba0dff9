//! In-process store implementing every repository port.
//!
//! Used when neither an external nor an embedded PostgreSQL instance is
//! available, and by handler tests. Data lives for the lifetime of the
//! process. The same invariants as the PostgreSQL schema are enforced: one
//! quest per hunter per day and compare-and-swap on the hunter revision.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CheckinRepository, CheckinRepositoryError, HunterRepository, HunterRepositoryError,
    QuestRepository, QuestRepositoryError, StoreDiagnostics, StoreDiagnosticsError,
    WorkoutRepository, WorkoutRepositoryError,
};
use crate::domain::{
    CheckinRecord, Hunter, HunterId, HunterProgressUpdate, NewCheckin, NewHunter, NewQuest,
    NewWorkout, Quest, QuestDate, WorkoutRecord,
};

const COLLECTIONS: [&str; 4] = ["checkins", "hunters", "quests", "workouts"];

#[derive(Debug, Default)]
struct MemoryState {
    hunters: Vec<Hunter>,
    workouts: Vec<WorkoutRecord>,
    quests: Vec<Quest>,
    checkins: Vec<CheckinRecord>,
}

/// Mutex-guarded collections shared by all repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

/// Lock poisoning means a writer panicked mid-update.
#[derive(Debug)]
struct Poisoned;

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, Poisoned> {
        self.state.lock().map_err(|_| Poisoned)
    }
}

const POISONED: &str = "in-memory store lock poisoned";

impl From<Poisoned> for HunterRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<Poisoned> for WorkoutRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<Poisoned> for QuestRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<Poisoned> for CheckinRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query(POISONED)
    }
}

impl From<Poisoned> for StoreDiagnosticsError {
    fn from(_: Poisoned) -> Self {
        Self::query(POISONED)
    }
}

#[async_trait]
impl HunterRepository for InMemoryStore {
    async fn create(
        &self,
        hunter: &NewHunter,
        now: DateTime<Utc>,
    ) -> Result<Hunter, HunterRepositoryError> {
        let created = Hunter::create(HunterId::random(), hunter.clone(), now);
        self.lock()?.hunters.push(created.clone());
        Ok(created)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Hunter>, HunterRepositoryError> {
        Ok(self.lock()?.hunters.iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &HunterId) -> Result<Option<Hunter>, HunterRepositoryError> {
        Ok(self
            .lock()?
            .hunters
            .iter()
            .find(|hunter| hunter.id() == *id)
            .cloned())
    }

    async fn save_progress(
        &self,
        id: &HunterId,
        expected_revision: u32,
        update: &HunterProgressUpdate,
    ) -> Result<Hunter, HunterRepositoryError> {
        let mut state = self.lock()?;
        let slot = state
            .hunters
            .iter_mut()
            .find(|hunter| hunter.id() == *id)
            .ok_or_else(|| HunterRepositoryError::not_found(id.to_string()))?;

        if slot.revision() != expected_revision {
            return Err(HunterRepositoryError::revision_mismatch(
                expected_revision,
                slot.revision(),
            ));
        }

        let updated = slot.clone().with_progress(update);
        *slot = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryStore {
    async fn insert(
        &self,
        workout: &NewWorkout,
        now: DateTime<Utc>,
    ) -> Result<WorkoutRecord, WorkoutRepositoryError> {
        let record = WorkoutRecord {
            id: Uuid::new_v4(),
            user_id: workout.user_id,
            workout_type: workout.workout_type.clone(),
            minutes: workout.minutes,
            difficulty: workout.difficulty,
            exp_awarded: workout.exp_awarded,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.workouts.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl QuestRepository for InMemoryStore {
    async fn find_for_day(
        &self,
        user_id: &HunterId,
        date: QuestDate,
    ) -> Result<Option<Quest>, QuestRepositoryError> {
        Ok(self
            .lock()?
            .quests
            .iter()
            .find(|quest| quest.user_id == *user_id && quest.date == date)
            .cloned())
    }

    async fn insert_if_absent(
        &self,
        quest: &NewQuest,
        now: DateTime<Utc>,
    ) -> Result<Quest, QuestRepositoryError> {
        let mut state = self.lock()?;
        if let Some(existing) = state
            .quests
            .iter()
            .find(|stored| stored.user_id == quest.user_id && stored.date == quest.date)
        {
            return Ok(existing.clone());
        }

        let stored = Quest {
            id: Uuid::new_v4(),
            user_id: quest.user_id,
            date: quest.date,
            title: quest.title.clone(),
            description: quest.description.clone(),
            exp_reward: quest.exp_reward,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        state.quests.push(stored.clone());
        Ok(stored)
    }

    async fn mark_completed(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError> {
        let mut state = self.lock()?;
        let Some(quest) = state
            .quests
            .iter_mut()
            .find(|quest| quest.id == *quest_id && !quest.completed)
        else {
            return Ok(false);
        };
        quest.completed = true;
        quest.updated_at = now;
        Ok(true)
    }

    async fn reopen(
        &self,
        quest_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, QuestRepositoryError> {
        let mut state = self.lock()?;
        let Some(quest) = state
            .quests
            .iter_mut()
            .find(|quest| quest.id == *quest_id && quest.completed)
        else {
            return Ok(false);
        };
        quest.completed = false;
        quest.updated_at = now;
        Ok(true)
    }
}

#[async_trait]
impl CheckinRepository for InMemoryStore {
    async fn insert(
        &self,
        checkin: &NewCheckin,
        now: DateTime<Utc>,
    ) -> Result<CheckinRecord, CheckinRepositoryError> {
        let record = CheckinRecord {
            id: Uuid::new_v4(),
            user_id: checkin.user_id,
            date: checkin.date,
            streak_after: checkin.streak_after,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.checkins.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl StoreDiagnostics for InMemoryStore {
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreDiagnosticsError> {
        // Touch the lock so a poisoned store reports as unhealthy.
        drop(self.lock()?);
        Ok(COLLECTIONS
            .iter()
            .take(limit)
            .map(|name| (*name).to_owned())
            .collect())
    }
}
