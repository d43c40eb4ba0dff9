//! Hunter roster and profile services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::hunter_progress::{map_hunter_repository_error, require_hunter};
use crate::domain::ports::{
    CreateHunterRequest, CreateHunterResponse, HUNTER_LIST_LIMIT, HunterCommand, HunterQuery,
    HunterRepository, ProfileRequest,
};
use crate::domain::{Error, Hunter, HunterProfile};

/// Service implementing the hunter command and query driving ports.
#[derive(Clone)]
pub struct HunterService<R: ?Sized> {
    hunter_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> HunterService<R> {
    /// Create a new service over the hunter repository.
    pub fn new(hunter_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { hunter_repo, clock }
    }
}

#[async_trait]
impl<R> HunterCommand for HunterService<R>
where
    R: HunterRepository + ?Sized,
{
    async fn create_hunter(
        &self,
        request: CreateHunterRequest,
    ) -> Result<CreateHunterResponse, Error> {
        let hunter = self
            .hunter_repo
            .create(&request.hunter, self.clock.utc())
            .await
            .map_err(map_hunter_repository_error)?;
        info!(hunter_id = %hunter.id(), "hunter created");
        Ok(CreateHunterResponse { hunter })
    }
}

#[async_trait]
impl<R> HunterQuery for HunterService<R>
where
    R: HunterRepository + ?Sized,
{
    async fn list_hunters(&self) -> Result<Vec<Hunter>, Error> {
        self.hunter_repo
            .list(HUNTER_LIST_LIMIT)
            .await
            .map_err(map_hunter_repository_error)
    }

    async fn profile(&self, request: ProfileRequest) -> Result<HunterProfile, Error> {
        let hunter = require_hunter(self.hunter_repo.as_ref(), &request.user_id).await?;
        Ok(HunterProfile::from(&hunter))
    }
}

#[cfg(test)]
#[path = "hunter_service_tests.rs"]
mod tests;
