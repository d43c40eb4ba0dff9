//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via Diesel, with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Progression rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Conditional writes**: hunter progress is guarded by a revision
//!   column and quest completion by `completed = false`, so concurrent
//!   requests cannot double-award EXP.
//!
//! # Example
//!
//! ```ignore
//! use hunter_backend::outbound::persistence::{DbPool, DieselHunterRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/solo_leveling_fitness")).await?;
//! let hunters = DieselHunterRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_checkin_repository;
mod diesel_hunter_repository;
mod diesel_quest_repository;
mod diesel_store_diagnostics;
mod diesel_workout_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_checkin_repository::DieselCheckinRepository;
pub use diesel_hunter_repository::DieselHunterRepository;
pub use diesel_quest_repository::DieselQuestRepository;
pub use diesel_store_diagnostics::DieselStoreDiagnostics;
pub use diesel_workout_repository::DieselWorkoutRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
