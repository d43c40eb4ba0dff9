//! Ordered provider chain choosing the backing store at startup.
//!
//! Each [`StoreProvider`] either yields a connected set of repository ports
//! or explains why it could not. [`select_store`] walks the providers in
//! order, logs every failure, and keeps the failures so `/test` can report
//! which providers were skipped.

mod providers;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CheckinRepository, HunterRepository, QuestRepository, StoreDiagnostics, WorkoutRepository,
};
use crate::domain::{ProviderFailure, StoreKind, StoreStatus};

use super::persistence::{MigrationError, PoolError};

pub use providers::{
    EmbeddedPostgresProvider, ExternalPostgresProvider, InMemoryProvider, providers_from_settings,
};

/// Repository ports served by one store.
#[derive(Clone)]
pub struct StorePorts {
    pub hunters: Arc<dyn HunterRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub quests: Arc<dyn QuestRepository>,
    pub checkins: Arc<dyn CheckinRepository>,
    pub diagnostics: Arc<dyn StoreDiagnostics>,
}

impl StorePorts {
    /// Serve every port from a single adapter.
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: HunterRepository
            + WorkoutRepository
            + QuestRepository
            + CheckinRepository
            + StoreDiagnostics
            + 'static,
    {
        Self {
            hunters: store.clone(),
            workouts: store.clone(),
            quests: store.clone(),
            checkins: store.clone(),
            diagnostics: store,
        }
    }
}

/// Resources that must be torn down when the process exits.
#[derive(Default)]
pub struct StoreGuard {
    embedded: Option<postgresql_embedded::PostgreSQL>,
}

impl StoreGuard {
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn embedded(cluster: postgresql_embedded::PostgreSQL) -> Self {
        Self {
            embedded: Some(cluster),
        }
    }

    /// Stop any process started for the store.
    pub async fn release(self) {
        if let Some(cluster) = self.embedded {
            match cluster.stop().await {
                Ok(()) => info!("embedded postgres stopped"),
                Err(error) => warn!(%error, "failed to stop embedded postgres"),
            }
        }
    }
}

/// A provider's successful connection.
pub struct ConnectedStore {
    pub ports: StorePorts,
    pub guard: StoreGuard,
}

/// Reasons a provider could not supply a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreConnectError {
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("embedded postgres failed: {message}")]
    Embedded { message: String },
}

impl StoreConnectError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn embedded(message: impl Into<String>) -> Self {
        Self::Embedded {
            message: message.into(),
        }
    }
}

/// One strategy for obtaining a backing store.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    fn kind(&self) -> StoreKind;

    async fn connect(&self) -> Result<ConnectedStore, StoreConnectError>;
}

/// Every provider in the chain failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no store provider is available ({} attempted)", failures.len())]
pub struct NoStoreAvailable {
    pub failures: Vec<ProviderFailure>,
}

/// The store chosen at startup.
pub struct StoreSelection {
    pub kind: StoreKind,
    pub ports: StorePorts,
    pub guard: StoreGuard,
    pub fallbacks: Vec<ProviderFailure>,
}

impl StoreSelection {
    /// Startup facts for the diagnostics endpoint.
    pub fn status(&self, database_url_set: bool, database_name_set: bool) -> StoreStatus {
        StoreStatus {
            kind: self.kind,
            database_url_set,
            database_name_set,
            fallbacks: self.fallbacks.clone(),
        }
    }
}

/// Try each provider in order and return the first that connects.
///
/// # Errors
///
/// Returns [`NoStoreAvailable`] with every failure when no provider connects.
pub async fn select_store(
    providers: Vec<Box<dyn StoreProvider>>,
) -> Result<StoreSelection, NoStoreAvailable> {
    let mut failures = Vec::new();
    for provider in providers {
        let kind = provider.kind();
        match provider.connect().await {
            Ok(ConnectedStore { ports, guard }) => {
                info!(provider = %kind, fallbacks = failures.len(), "store provider selected");
                if !kind.is_persistent() {
                    warn!("using the in-memory store; data will not survive a restart");
                }
                return Ok(StoreSelection {
                    kind,
                    ports,
                    guard,
                    fallbacks: failures,
                });
            }
            Err(error) => {
                warn!(provider = %kind, %error, "store provider unavailable; trying next");
                failures.push(ProviderFailure {
                    kind,
                    reason: error.to_string(),
                });
            }
        }
    }
    Err(NoStoreAvailable { failures })
}
