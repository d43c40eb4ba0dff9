//! Port for choosing which catalogue quest a hunter receives.

use rand::seq::SliceRandom;

use crate::domain::{QUEST_CATALOGUE, QuestTemplate};

/// Picks a quest template for a newly generated daily quest.
#[cfg_attr(test, mockall::automock)]
pub trait QuestSelector: Send + Sync {
    fn pick(&self) -> QuestTemplate;
}

/// Uniformly random choice over the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomQuestSelector;

impl QuestSelector for RandomQuestSelector {
    fn pick(&self) -> QuestTemplate {
        QUEST_CATALOGUE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(QUEST_CATALOGUE[0])
    }
}

/// Always returns the catalogue entry at a fixed index, wrapping around.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedQuestSelector(pub usize);

impl QuestSelector for FixedQuestSelector {
    fn pick(&self) -> QuestTemplate {
        QUEST_CATALOGUE[self.0 % QUEST_CATALOGUE.len()]
    }
}
