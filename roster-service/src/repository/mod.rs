//! Read-only data sources for the roster
//!
//! This module provides the storage-neutral traits the request layer talks
//! to, the query building blocks it hands them, and two implementations.
//!
//! # Features
//!
//! - **Listing**: [`ListRepository`] for filtered, ordered, windowed reads plus counts
//! - **Relation Loading**: [`ClassroomRepository`] for one classroom with supplies and students
//! - **Filtering**: [`FilterCondition`] predicates combined with AND
//! - **Pagination**: [`Pagination`] limit/offset windows
//! - **Backends**: [`InMemoryRoster`] for tests and demos, `PgRoster` behind the `database` feature
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_service::repository::{InMemoryRoster, ListRepository, Pagination};
//! use roster_service::sort::STUDENT_ORDER;
//!
//! let source = InMemoryRoster::sample();
//! let total = ListRepository::<Student>::count(&source, &[]).await?;
//! let rows: Vec<Student> = source.find_all(&[], STUDENT_ORDER, Pagination::new(0, total)).await?;
//! ```

mod error;
mod memory;
mod pagination;
#[cfg(feature = "database")]
mod postgres;
mod traits;

// Re-export all public types
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::{InMemoryRoster, InMemoryRosterBuilder};
pub use pagination::{
    FilterCondition, FilterOperator, FilterValue, OrderDirection, Pagination, SortSpec,
};
#[cfg(feature = "database")]
pub use postgres::PgRoster;
pub use traits::{ClassroomRepository, ListRepository, RepositoryResult, RosterSource};
