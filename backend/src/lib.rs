//! Backend library for the Solo Leveling fitness API.
//!
//! Hunters earn EXP from workouts, daily quests and check-ins. The crate is
//! laid out hexagonally: [`domain`] holds the rules and services,
//! [`inbound`] adapts HTTP onto the driving ports, and [`outbound`] provides
//! the PostgreSQL and in-memory stores behind the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
