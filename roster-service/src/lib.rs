//! # roster-service
//!
//! Read-only HTTP API over a school roster: students, classrooms, their
//! supplies and enrollments.
//!
//! ## Features
//!
//! - **List endpoints**: `GET /students` and `GET /classrooms` with per-field filters
//! - **Validation**: every bad parameter is reported, not just the first one
//! - **Pagination**: `page`/`size` windows plus a `page=0&size=0` all-rows mode
//! - **Classroom detail**: `GET /classrooms/{id}` with `supplyCount`, `studentCount` and `overloaded`
//! - **Data sources**: PostgreSQL via sqlx, or an in-memory roster for tests and demos
//! - **Health checks**: Liveness and readiness probes
//! - **Graceful shutdown**: Proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use roster_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryRoster::sample());
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod health;
pub mod models;
pub mod observability;
pub mod repository;
pub mod server;
pub mod sort;
pub mod state;

#[cfg(feature = "database")]
pub mod database;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{router, ApiError};
    pub use crate::health::{health, readiness};
    pub use crate::models::{Classroom, ClassroomWithRelations, Student, Supply};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{InMemoryRoster, RosterSource};
    pub use crate::server::Server;
    pub use crate::state::AppState;

    #[cfg(feature = "database")]
    pub use crate::database::create_pool;

    #[cfg(feature = "database")]
    pub use crate::repository::PgRoster;
}
