//! PostgreSQL data source
//!
//! Builds every statement with [`sqlx::QueryBuilder`]. Values are always
//! bound; identifiers come only from the static filter registries and sort
//! specs and are double-quoted, matching the camelCase column names of the
//! roster schema.

use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{FilterCondition, FilterOperator, FilterValue, Pagination, SortSpec};
use super::traits::{ClassroomRepository, ListRepository, RepositoryResult, RosterSource};
use crate::models::{Classroom, ClassroomWithRelations, Student, Supply};
use crate::sort::{STUDENT_ORDER, SUPPLY_ORDER};

const STUDENTS: &str = "\"Students\"";
const CLASSROOMS: &str = "\"Classrooms\"";
const SUPPLIES: &str = "\"Supplies\"";
const MEMBERSHIPS: &str = "\"StudentClassrooms\"";

const STUDENT_COLUMNS: &[&str] = &["id", "firstName", "lastName", "leftHanded"];
const CLASSROOM_COLUMNS: &[&str] = &["id", "name", "studentLimit"];
const SUPPLY_COLUMNS: &[&str] = &["id", "name", "category", "handed"];

/// Roster backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgRoster {
    pool: PgPool,
}

impl PgRoster {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn push_columns(builder: &mut QueryBuilder<'_, Postgres>, columns: &[&str], qualifier: &str) {
    let mut separated = builder.separated(", ");
    for column in columns {
        separated.push(format!("{qualifier}{}", quote(column)));
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &[FilterCondition]) {
    for (index, condition) in filters.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(quote(condition.field));

        match (&condition.operator, &condition.value) {
            (FilterOperator::Between, FilterValue::IntegerRange(min, max)) => {
                builder.push(" BETWEEN ").push_bind(*min);
                builder.push(" AND ").push_bind(*max);
            }
            (operator, value) => {
                builder.push(format!(" {operator} "));
                match value {
                    FilterValue::String(s) => builder.push_bind(s.clone()),
                    FilterValue::Integer(n) => builder.push_bind(*n),
                    FilterValue::Boolean(b) => builder.push_bind(*b),
                    // BETWEEN is the only operator carrying a range
                    FilterValue::IntegerRange(min, _) => builder.push_bind(*min),
                };
                // Patterns pass through unescaped, so `\` is an ordinary character
                if *operator == FilterOperator::Like {
                    builder.push(" ESCAPE ''");
                }
            }
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: SortSpec, qualifier: &str) {
    if sort.is_empty() {
        return;
    }
    builder.push(" ORDER BY ");
    let mut separated = builder.separated(", ");
    for (field, direction) in sort {
        separated.push(format!("{qualifier}{} {}", quote(field), direction.as_sql()));
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn map_sqlx(operation: RepositoryOperation) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |err| {
        use sqlx::Error;
        match &err {
            Error::PoolTimedOut => RepositoryError::timeout(operation, err.to_string()),
            Error::Io(_) | Error::Tls(_) | Error::PoolClosed | Error::WorkerCrashed => {
                RepositoryError::connection_failed(operation, err.to_string())
            }
            Error::ColumnDecode { .. }
            | Error::ColumnNotFound(_)
            | Error::Decode(_)
            | Error::TypeNotFound { .. } => {
                RepositoryError::serialization_error(operation, err.to_string())
            }
            _ => RepositoryError::database_error(operation, err.to_string()),
        }
    }
}

async fn count_rows(
    pool: &PgPool,
    table: &str,
    filters: &[FilterCondition],
) -> RepositoryResult<u64> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    builder.push(table);
    push_filters(&mut builder, filters);

    let total: i64 = builder
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(map_sqlx(RepositoryOperation::Count))?;
    Ok(to_u64(total))
}

async fn select_rows<E>(
    pool: &PgPool,
    table: &str,
    columns: &[&str],
    filters: &[FilterCondition],
    sort: SortSpec,
    pagination: Pagination,
) -> RepositoryResult<Vec<E>>
where
    E: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
    push_columns(&mut builder, columns, "");
    builder.push(" FROM ").push(table);
    push_filters(&mut builder, filters);
    push_order(&mut builder, sort, "");
    builder.push(" LIMIT ").push_bind(to_i64(pagination.limit));
    builder.push(" OFFSET ").push_bind(to_i64(pagination.offset));

    tracing::debug!(sql = builder.sql(), "fetching rows");

    builder
        .build_query_as::<E>()
        .fetch_all(pool)
        .await
        .map_err(map_sqlx(RepositoryOperation::FindAll))
}

async fn count_children(pool: &PgPool, table: &str, classroom_id: i32) -> RepositoryResult<u64> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    builder.push(table);
    builder.push(" WHERE \"classroomId\" = ").push_bind(classroom_id);

    let total: i64 = builder
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(|e| {
            map_sqlx(RepositoryOperation::CountRelated)(e)
                .with_entity("Classroom", classroom_id.to_string())
        })?;
    Ok(to_u64(total))
}

impl ListRepository<Student> for PgRoster {
    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        count_rows(&self.pool, STUDENTS, filters).await
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        sort: SortSpec,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Student>> {
        select_rows(&self.pool, STUDENTS, STUDENT_COLUMNS, filters, sort, pagination).await
    }
}

impl ListRepository<Classroom> for PgRoster {
    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        count_rows(&self.pool, CLASSROOMS, filters).await
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        sort: SortSpec,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Classroom>> {
        select_rows(&self.pool, CLASSROOMS, CLASSROOM_COLUMNS, filters, sort, pagination).await
    }
}

impl ClassroomRepository for PgRoster {
    async fn find_with_relations(&self, id: i32) -> RepositoryResult<Option<ClassroomWithRelations>> {
        let to_error = |e: sqlx::Error| {
            map_sqlx(RepositoryOperation::FindById)(e).with_entity("Classroom", id.to_string())
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        push_columns(&mut builder, CLASSROOM_COLUMNS, "");
        builder.push(" FROM ").push(CLASSROOMS);
        builder.push(" WHERE \"id\" = ").push_bind(id);

        let Some(classroom) = builder
            .build_query_as::<Classroom>()
            .fetch_optional(&self.pool)
            .await
            .map_err(to_error)?
        else {
            return Ok(None);
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        push_columns(&mut builder, SUPPLY_COLUMNS, "");
        builder.push(" FROM ").push(SUPPLIES);
        builder.push(" WHERE \"classroomId\" = ").push_bind(id);
        push_order(&mut builder, SUPPLY_ORDER, "");
        let supplies = builder
            .build_query_as::<Supply>()
            .fetch_all(&self.pool)
            .await
            .map_err(to_error)?;

        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        push_columns(&mut builder, STUDENT_COLUMNS, "s.");
        builder.push(" FROM ").push(STUDENTS).push(" s JOIN ").push(MEMBERSHIPS);
        builder.push(" m ON m.\"studentId\" = s.\"id\" WHERE m.\"classroomId\" = ");
        builder.push_bind(id);
        push_order(&mut builder, STUDENT_ORDER, "s.");
        let students = builder
            .build_query_as::<Student>()
            .fetch_all(&self.pool)
            .await
            .map_err(to_error)?;

        Ok(Some(ClassroomWithRelations {
            classroom,
            supplies,
            students,
        }))
    }

    async fn supply_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
        count_children(&self.pool, SUPPLIES, classroom_id).await
    }

    async fn student_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
        count_children(&self.pool, MEMBERSHIPS, classroom_id).await
    }
}

impl RosterSource for PgRoster {
    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx(RepositoryOperation::Ping))
    }
}
