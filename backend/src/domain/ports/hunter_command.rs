//! Driving port for enrolling hunters.

use async_trait::async_trait;

use crate::domain::{Error, Hunter, NewHunter};

/// Request to create a hunter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHunterRequest {
    pub hunter: NewHunter,
}

/// Response carrying the stored hunter, including its generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHunterResponse {
    pub hunter: Hunter,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HunterCommand: Send + Sync {
    /// Create a hunter at level 1 with no EXP and no streak.
    async fn create_hunter(
        &self,
        request: CreateHunterRequest,
    ) -> Result<CreateHunterResponse, Error>;
}
