//! Read-only data source traits
//!
//! The request layer only ever talks to these traits, so validation and
//! pagination logic stay independent of the storage technology. Methods use
//! RPITIT (Return Position Impl Trait In Traits) so implementations can be
//! written as plain `async fn`.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_service::repository::{ListRepository, Pagination};
//!
//! let total = ListRepository::<Student>::count(&source, &filters).await?;
//! let rows = ListRepository::<Student>::find_all(&source, &filters, STUDENT_ORDER, window).await?;
//! ```

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::{FilterCondition, Pagination, SortSpec};
use crate::models::{Classroom, ClassroomWithRelations, Student};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Filtered, ordered, windowed reads over one entity collection
pub trait ListRepository<Entity>: Send + Sync {
    /// Count entities matching the given filters
    ///
    /// The count ignores any pagination window so it always reports the
    /// full size of the filtered collection.
    fn count(
        &self,
        filters: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Fetch entities matching the given filters
    ///
    /// # Arguments
    ///
    /// - `filters`: zero or more predicates, combined with AND
    /// - `sort`: ordered sort keys applied before the window
    /// - `pagination`: limit/offset window
    fn find_all(
        &self,
        filters: &[FilterCondition],
        sort: SortSpec,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;
}

/// Single-classroom reads and per-classroom related counts
pub trait ClassroomRepository: Send + Sync {
    /// Load a classroom with its supplies and students
    ///
    /// Returns `Ok(None)` when no classroom has the given key.
    fn find_with_relations(
        &self,
        id: i32,
    ) -> impl Future<Output = RepositoryResult<Option<ClassroomWithRelations>>> + Send;

    /// Number of supplies whose parent is the given classroom
    fn supply_count(&self, classroom_id: i32)
        -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Number of membership rows linking students to the given classroom
    fn student_count(
        &self,
        classroom_id: i32,
    ) -> impl Future<Output = RepositoryResult<u64>> + Send;
}

/// Everything the roster endpoints need from a data source
pub trait RosterSource:
    ListRepository<Student> + ListRepository<Classroom> + ClassroomRepository + Clone + 'static
{
    /// Cheap connectivity probe used by the readiness endpoint
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
