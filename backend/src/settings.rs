//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HUNTER_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_FALLBACK_DATABASE_NAME: &str = "solo_leveling_fitness";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings controlling store selection and the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HUNTER")]
pub struct HunterSettings {
    /// PostgreSQL server URL for the external provider.
    pub database_url: Option<String>,
    /// Database name on the external server.
    pub database_name: Option<String>,
    /// Database created inside the embedded cluster.
    pub fallback_database_name: Option<String>,
    /// Skip the embedded PostgreSQL cluster and fall straight back to the
    /// in-memory store.
    #[ortho_config(default = false)]
    pub embedded_disabled: bool,
    /// Data directory for the embedded cluster; temporary when unset.
    pub embedded_data_dir: Option<PathBuf>,
    /// Address the HTTP listener binds to.
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    /// Maximum pooled connections per PostgreSQL provider.
    pub pool_max_size: Option<u32>,
}

impl HunterSettings {
    /// External database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// External database name, ignoring blank values.
    pub fn database_name(&self) -> Option<&str> {
        non_blank(self.database_name.as_deref())
    }

    pub fn fallback_database_name(&self) -> &str {
        non_blank(self.fallback_database_name.as_deref()).unwrap_or(DEFAULT_FALLBACK_DATABASE_NAME)
    }

    /// Whether the embedded cluster joins the provider chain.
    pub fn embedded_enabled(&self) -> bool {
        !self.embedded_disabled
    }

    pub fn embedded_data_dir(&self) -> Option<&Path> {
        self.embedded_data_dir.as_deref()
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
