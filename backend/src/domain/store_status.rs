//! Backing store diagnostics reported by `/test`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which provider ended up serving the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    ExternalPostgres,
    EmbeddedPostgres,
    InMemory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalPostgres => "external_postgres",
            Self::EmbeddedPostgres => "embedded_postgres",
            Self::InMemory => "in_memory",
        }
    }

    /// Whether data written through this provider survives a restart.
    pub fn is_persistent(self) -> bool {
        !matches!(self, Self::InMemory)
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider that was tried and skipped during startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub kind: StoreKind,
    pub reason: String,
}

/// Startup facts about the selected store, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub kind: StoreKind,
    pub database_url_set: bool,
    pub database_name_set: bool,
    pub fallbacks: Vec<ProviderFailure>,
}

/// Live diagnostics combining [`StoreStatus`] with a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub status: StoreStatus,
    pub connected: bool,
    pub collections: Vec<String>,
    pub probe_error: Option<String>,
}

impl StoreReport {
    /// Human readable database status line.
    pub fn database_summary(&self) -> String {
        match (&self.probe_error, self.status.kind) {
            (Some(error), _) => format!("Error: {error}"),
            (None, StoreKind::InMemory) => "In-memory store (data is not persisted)".to_owned(),
            (None, kind) => format!("Connected via {kind}"),
        }
    }

    pub fn connection_status(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Not Connected"
        }
    }
}
