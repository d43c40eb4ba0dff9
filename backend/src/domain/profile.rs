//! Read model summarising a hunter's progress.

use super::{Hunter, HunterId};

/// Progress snapshot returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunterProfile {
    pub id: HunterId,
    pub name: String,
    pub title: Option<String>,
    pub level: u32,
    pub exp: u64,
    pub exp_to_next: u64,
    pub progress_pct: u8,
    pub streak: u32,
}

impl From<&Hunter> for HunterProfile {
    fn from(hunter: &Hunter) -> Self {
        let progression = hunter.progression();
        Self {
            id: hunter.id(),
            name: hunter.name().as_str().to_owned(),
            title: hunter.title().map(str::to_owned),
            level: progression.level().get(),
            exp: progression.exp(),
            exp_to_next: progression.exp_to_next(),
            progress_pct: progression.progress_pct(),
            streak: hunter.streak(),
        }
    }
}
