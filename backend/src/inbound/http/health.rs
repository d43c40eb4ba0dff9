//! Health and diagnostics endpoints.
//!
//! Liveness and readiness probes serve orchestrators; `/` and `/test` give
//! humans a quick view of the service and its backing store.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{StoreKind, StoreReport};
use crate::inbound::http::state::HttpState;

/// Message returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "Solo Leveling Fitness API running";

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. Return 200 once the store is selected and the server can
/// handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Root greeting.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Solo Leveling Fitness API running")]
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
#[get("/")]
pub async fn root() -> web::Json<RootResponse> {
    web::Json(RootResponse {
        message: ROOT_MESSAGE.to_owned(),
    })
}

/// A provider skipped during startup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FallbackResponse {
    #[schema(example = "external_postgres")]
    pub provider: String,
    pub reason: String,
}

/// Store diagnostics returned by `GET /test`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    #[schema(example = "running")]
    pub backend: String,
    #[schema(example = "Connected via embedded_postgres")]
    pub database: String,
    #[schema(example = "set")]
    pub database_url: String,
    #[schema(example = "not set")]
    pub database_name: String,
    #[schema(example = "Connected")]
    pub connection_status: String,
    pub collections: Vec<String>,
    #[schema(example = "embedded_postgres")]
    pub provider: String,
    pub persistent: bool,
    pub fallbacks: Vec<FallbackResponse>,
}

fn set_label(is_set: bool) -> String {
    if is_set { "set" } else { "not set" }.to_owned()
}

impl From<StoreReport> for DiagnosticsResponse {
    fn from(report: StoreReport) -> Self {
        let database = report.database_summary();
        let connection_status = report.connection_status().to_owned();
        let kind: StoreKind = report.status.kind;
        Self {
            backend: "running".to_owned(),
            database,
            database_url: set_label(report.status.database_url_set),
            database_name: set_label(report.status.database_name_set),
            connection_status,
            collections: report.collections,
            provider: kind.to_string(),
            persistent: kind.is_persistent(),
            fallbacks: report
                .status
                .fallbacks
                .into_iter()
                .map(|failure| FallbackResponse {
                    provider: failure.kind.to_string(),
                    reason: failure.reason,
                })
                .collect(),
        }
    }
}

/// Report which store is serving requests and whether it answers.
///
/// Probe failures are reported in the body; the endpoint itself always
/// answers 200.
#[utoipa::path(
    get,
    path = "/test",
    tags = ["health"],
    responses((status = 200, description = "Store diagnostics", body = DiagnosticsResponse))
)]
#[get("/test")]
pub async fn diagnostics(state: web::Data<HttpState>) -> web::Json<DiagnosticsResponse> {
    let report = state.store_status.report().await;
    web::Json(DiagnosticsResponse::from(report))
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
