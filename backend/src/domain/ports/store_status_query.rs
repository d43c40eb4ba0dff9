//! Driving port for backing store diagnostics.

use async_trait::async_trait;

use crate::domain::StoreReport;

/// Maximum number of collection names reported.
pub const COLLECTION_LIST_LIMIT: usize = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreStatusQuery: Send + Sync {
    /// Probe the store. Probe failures are reported, never raised.
    async fn report(&self) -> StoreReport;
}
