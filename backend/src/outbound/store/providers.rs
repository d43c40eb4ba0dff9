//! Concrete store providers and the chain built from settings.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use postgresql_embedded::PostgreSQL;
use tracing::info;
use url::Url;

use crate::domain::StoreKind;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselCheckinRepository, DieselHunterRepository, DieselQuestRepository,
    DieselStoreDiagnostics, DieselWorkoutRepository, PoolConfig, run_migrations,
};
use crate::settings::HunterSettings;

use super::{ConnectedStore, StoreConnectError, StoreGuard, StorePorts, StoreProvider};

/// Migrate `database_url` and wire Diesel repositories over a fresh pool.
async fn connect_postgres(
    database_url: &str,
    pool_max_size: u32,
) -> Result<StorePorts, StoreConnectError> {
    run_migrations(database_url).await?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(pool_max_size)).await?;

    Ok(StorePorts {
        hunters: Arc::new(DieselHunterRepository::new(pool.clone())),
        workouts: Arc::new(DieselWorkoutRepository::new(pool.clone())),
        quests: Arc::new(DieselQuestRepository::new(pool.clone())),
        checkins: Arc::new(DieselCheckinRepository::new(pool.clone())),
        diagnostics: Arc::new(DieselStoreDiagnostics::new(pool)),
    })
}

/// Point a server URL at a specific database.
fn database_url_for(server_url: &str, database_name: &str) -> Result<String, StoreConnectError> {
    let mut url = Url::parse(server_url)
        .map_err(|err| StoreConnectError::configuration(format!("invalid database URL: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(StoreConnectError::configuration(
            "database URL must be hierarchical",
        ));
    }
    url.set_path(&format!("/{database_name}"));
    Ok(url.into())
}

/// PostgreSQL server reachable at a configured URL.
#[derive(Debug, Clone)]
pub struct ExternalPostgresProvider {
    database_url: String,
    database_name: String,
    pool_max_size: u32,
}

impl ExternalPostgresProvider {
    pub fn new(
        database_url: impl Into<String>,
        database_name: impl Into<String>,
        pool_max_size: u32,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            database_name: database_name.into(),
            pool_max_size,
        }
    }
}

#[async_trait]
impl StoreProvider for ExternalPostgresProvider {
    fn kind(&self) -> StoreKind {
        StoreKind::ExternalPostgres
    }

    async fn connect(&self) -> Result<ConnectedStore, StoreConnectError> {
        let url = database_url_for(&self.database_url, &self.database_name)?;
        let ports = connect_postgres(&url, self.pool_max_size).await?;
        Ok(ConnectedStore {
            ports,
            guard: StoreGuard::none(),
        })
    }
}

/// PostgreSQL cluster downloaded and run by this process.
#[derive(Debug, Clone)]
pub struct EmbeddedPostgresProvider {
    database_name: String,
    data_dir: Option<PathBuf>,
    pool_max_size: u32,
}

impl EmbeddedPostgresProvider {
    pub fn new(
        database_name: impl Into<String>,
        data_dir: Option<PathBuf>,
        pool_max_size: u32,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            data_dir,
            pool_max_size,
        }
    }

    fn settings(&self) -> postgresql_embedded::Settings {
        let mut settings = postgresql_embedded::Settings::default();
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
            settings.temporary = false;
        }
        settings
    }

    async fn start_cluster(&self) -> Result<PostgreSQL, StoreConnectError> {
        let embedded = |err: postgresql_embedded::Error| StoreConnectError::embedded(err.to_string());

        let mut cluster = PostgreSQL::new(self.settings());
        cluster.setup().await.map_err(embedded)?;
        cluster.start().await.map_err(embedded)?;
        info!(port = cluster.settings().port, "embedded postgres started");
        Ok(cluster)
    }

    async fn prepare(&self, cluster: &PostgreSQL) -> Result<StorePorts, StoreConnectError> {
        let embedded = |err: postgresql_embedded::Error| StoreConnectError::embedded(err.to_string());

        if !cluster
            .database_exists(&self.database_name)
            .await
            .map_err(embedded)?
        {
            cluster
                .create_database(&self.database_name)
                .await
                .map_err(embedded)?;
        }
        let url = cluster.settings().url(&self.database_name);
        connect_postgres(&url, self.pool_max_size).await
    }
}

#[async_trait]
impl StoreProvider for EmbeddedPostgresProvider {
    fn kind(&self) -> StoreKind {
        StoreKind::EmbeddedPostgres
    }

    async fn connect(&self) -> Result<ConnectedStore, StoreConnectError> {
        let cluster = self.start_cluster().await?;
        match self.prepare(&cluster).await {
            Ok(ports) => Ok(ConnectedStore {
                ports,
                guard: StoreGuard::embedded(cluster),
            }),
            Err(error) => {
                StoreGuard::embedded(cluster).release().await;
                Err(error)
            }
        }
    }
}

/// Process-local store used when no PostgreSQL is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryProvider;

#[async_trait]
impl StoreProvider for InMemoryProvider {
    fn kind(&self) -> StoreKind {
        StoreKind::InMemory
    }

    async fn connect(&self) -> Result<ConnectedStore, StoreConnectError> {
        Ok(ConnectedStore {
            ports: StorePorts::from_shared(Arc::new(InMemoryStore::new())),
            guard: StoreGuard::none(),
        })
    }
}

/// Provider chain for the given settings.
///
/// The external provider needs both a URL and a database name; the embedded
/// provider can be disabled; the in-memory provider always closes the chain.
pub fn providers_from_settings(settings: &HunterSettings) -> Vec<Box<dyn StoreProvider>> {
    let mut providers: Vec<Box<dyn StoreProvider>> = Vec::new();
    if let (Some(url), Some(name)) = (settings.database_url(), settings.database_name()) {
        providers.push(Box::new(ExternalPostgresProvider::new(
            url,
            name,
            settings.pool_max_size(),
        )));
    }
    if settings.embedded_enabled() {
        providers.push(Box::new(EmbeddedPostgresProvider::new(
            settings.fallback_database_name(),
            settings.embedded_data_dir().map(PathBuf::from),
            settings.pool_max_size(),
        )));
    }
    providers.push(Box::new(InMemoryProvider));
    providers
}
