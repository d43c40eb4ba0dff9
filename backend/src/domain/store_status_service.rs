//! Backing store diagnostics service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{COLLECTION_LIST_LIMIT, StoreDiagnostics, StoreStatusQuery};
use crate::domain::{StoreReport, StoreStatus};

/// Combines the startup selection facts with a live collection probe.
#[derive(Clone)]
pub struct StoreStatusService<D: ?Sized> {
    diagnostics: Arc<D>,
    status: StoreStatus,
}

impl<D: ?Sized> StoreStatusService<D> {
    pub fn new(diagnostics: Arc<D>, status: StoreStatus) -> Self {
        Self {
            diagnostics,
            status,
        }
    }
}

#[async_trait]
impl<D> StoreStatusQuery for StoreStatusService<D>
where
    D: StoreDiagnostics + ?Sized,
{
    async fn report(&self) -> StoreReport {
        match self.diagnostics.list_collections(COLLECTION_LIST_LIMIT).await {
            Ok(collections) => StoreReport {
                status: self.status.clone(),
                connected: true,
                collections,
                probe_error: None,
            },
            Err(error) => {
                warn!(error = %error, "store diagnostics probe failed");
                StoreReport {
                    status: self.status.clone(),
                    connected: false,
                    collections: Vec::new(),
                    probe_error: Some(error.to_string()),
                }
            }
        }
    }
}
