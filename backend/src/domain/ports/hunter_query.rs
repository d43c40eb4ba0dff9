//! Driving port for reading hunters and their profiles.

use async_trait::async_trait;

use crate::domain::{Error, Hunter, HunterId, HunterProfile};

/// Upper bound on the roster listing.
pub const HUNTER_LIST_LIMIT: usize = 100;

/// Request for a hunter's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRequest {
    pub user_id: HunterId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HunterQuery: Send + Sync {
    /// List up to [`HUNTER_LIST_LIMIT`] hunters, oldest first.
    async fn list_hunters(&self) -> Result<Vec<Hunter>, Error>;

    /// Progress summary for one hunter.
    async fn profile(&self, request: ProfileRequest) -> Result<HunterProfile, Error>;
}
