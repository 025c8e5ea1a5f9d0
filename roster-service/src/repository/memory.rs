//! Deterministic in-memory data source
//!
//! Evaluates predicate sets, sort specs and windows in-process. Used by tests
//! and as the fallback source when no database is configured.

use std::cmp::Ordering;
use std::sync::Arc;

use regex::Regex;

use super::error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use super::pagination::{FilterCondition, FilterOperator, FilterValue, Pagination, SortSpec};
use super::traits::{ClassroomRepository, ListRepository, RepositoryResult, RosterSource};
use crate::models::{Classroom, ClassroomWithRelations, Student, Supply};
use crate::sort::{STUDENT_ORDER, SUPPLY_ORDER};

/// A field value borrowed from a row, used for predicate evaluation and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    /// Text column
    Text(&'a str),
    /// Integer column
    Integer(i64),
    /// Boolean column
    Boolean(bool),
}

/// Field lookup by column name
pub trait Record {
    /// Value of the named column, or `None` if the row has no such column
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl Record for Student {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Integer(i64::from(self.id))),
            "firstName" => Some(FieldValue::Text(&self.first_name)),
            "lastName" => Some(FieldValue::Text(&self.last_name)),
            "leftHanded" => Some(FieldValue::Boolean(self.left_handed)),
            _ => None,
        }
    }
}

impl Record for Classroom {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Integer(i64::from(self.id))),
            "name" => Some(FieldValue::Text(&self.name)),
            "studentLimit" => Some(FieldValue::Integer(i64::from(self.student_limit))),
            _ => None,
        }
    }
}

impl Record for Supply {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Integer(i64::from(self.id))),
            "name" => Some(FieldValue::Text(&self.name)),
            "category" => Some(FieldValue::Text(&self.category)),
            "handed" => Some(FieldValue::Text(&self.handed)),
            _ => None,
        }
    }
}

/// A filter condition ready to be evaluated against rows
///
/// `LIKE` patterns are compiled once per query rather than once per row.
#[derive(Debug)]
pub struct CompiledFilter<'a> {
    condition: &'a FilterCondition,
    pattern: Option<Regex>,
}

impl<'a> CompiledFilter<'a> {
    /// Compile one condition
    pub fn new(condition: &'a FilterCondition) -> Result<Self, regex::Error> {
        let pattern = match (condition.operator, &condition.value) {
            (FilterOperator::Like, FilterValue::String(pattern)) => Some(like_regex(pattern)?),
            _ => None,
        };
        Ok(Self { condition, pattern })
    }

    /// Whether a row satisfies the condition
    ///
    /// A condition on an unknown column, or with a value of the wrong type,
    /// matches nothing.
    pub fn matches<R: Record>(&self, row: &R) -> bool {
        let condition = self.condition;
        let Some(actual) = row.field(condition.field) else {
            return false;
        };

        match (condition.operator, actual, &condition.value) {
            (FilterOperator::Equal, FieldValue::Boolean(a), FilterValue::Boolean(b)) => a == *b,
            (FilterOperator::Equal, FieldValue::Integer(a), FilterValue::Integer(b)) => a == *b,
            (FilterOperator::Equal, FieldValue::Text(a), FilterValue::String(b)) => a == b,
            (FilterOperator::LessThanOrEqual, FieldValue::Integer(a), FilterValue::Integer(b)) => {
                a <= *b
            }
            (
                FilterOperator::Between,
                FieldValue::Integer(a),
                FilterValue::IntegerRange(min, max),
            ) => *min <= a && a <= *max,
            (FilterOperator::Like, FieldValue::Text(a), FilterValue::String(_)) => self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(a)),
            _ => false,
        }
    }
}

/// Translate a SQL `LIKE` pattern into an anchored regex
///
/// `%` matches any run and `_` one character. There is no escape character,
/// so every other character is literal. Matching is case-sensitive, like
/// Postgres `LIKE`.
pub fn like_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::from("(?s)^");
    let mut literal = String::new();

    for c in pattern.chars() {
        let wildcard = match c {
            '%' => ".*",
            '_' => ".",
            other => {
                literal.push(other);
                continue;
            }
        };
        source.push_str(&regex::escape(&literal));
        literal.clear();
        source.push_str(wildcard);
    }

    source.push_str(&regex::escape(&literal));
    source.push('$');
    Regex::new(&source)
}

fn compile(
    filters: &[FilterCondition],
    operation: RepositoryOperation,
) -> RepositoryResult<Vec<CompiledFilter<'_>>> {
    filters
        .iter()
        .map(|condition| {
            CompiledFilter::new(condition).map_err(|e| {
                RepositoryError::new(operation, RepositoryErrorKind::Other, e.to_string())
            })
        })
        .collect()
}

fn keep<R: Record>(row: &R, filters: &[CompiledFilter<'_>]) -> bool {
    filters.iter().all(|filter| filter.matches(row))
}

/// Stable multi-key sort following a [`SortSpec`]
pub fn sort_rows<R: Record>(rows: &mut [R], sort: SortSpec) {
    rows.sort_by(|a, b| {
        sort.iter()
            .map(|(field, direction)| {
                let ordering = a.field(field).cmp(&b.field(field));
                match direction {
                    super::OrderDirection::Ascending => ordering,
                    super::OrderDirection::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

fn select<R: Record + Clone>(
    rows: &[R],
    filters: &[FilterCondition],
    sort: SortSpec,
    pagination: Pagination,
) -> RepositoryResult<Vec<R>> {
    let filters = compile(filters, RepositoryOperation::FindAll)?;
    let mut selected: Vec<R> = rows
        .iter()
        .filter(|row| keep(*row, &filters))
        .cloned()
        .collect();
    sort_rows(&mut selected, sort);

    let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
    Ok(selected.into_iter().skip(offset).take(limit).collect())
}

fn count_matching<R: Record>(rows: &[R], filters: &[FilterCondition]) -> RepositoryResult<u64> {
    let filters = compile(filters, RepositoryOperation::Count)?;
    Ok(rows.iter().filter(|row| keep(*row, &filters)).count() as u64)
}

#[derive(Debug, Default)]
struct RosterData {
    students: Vec<Student>,
    classrooms: Vec<Classroom>,
    /// `(classroom_id, supply)`
    supplies: Vec<(i32, Supply)>,
    /// `(student_id, classroom_id)`
    memberships: Vec<(i32, i32)>,
}

/// In-memory roster shared cheaply between handlers
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    data: Arc<RosterData>,
}

impl InMemoryRoster {
    /// Start building a roster
    pub fn builder() -> InMemoryRosterBuilder {
        InMemoryRosterBuilder::default()
    }

    /// A small fixed roster for running the service without a database
    pub fn sample() -> Self {
        let student = |id, first: &str, last: &str, left_handed| Student {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            left_handed,
        };
        let supply = |id, name: &str, category: &str, handed: &str| Supply {
            id,
            name: name.to_string(),
            category: category.to_string(),
            handed: handed.to_string(),
        };

        Self::builder()
            .classroom(Classroom {
                id: 1,
                name: "Ms. Ross's Art Class".to_string(),
                student_limit: 2,
            })
            .classroom(Classroom {
                id: 2,
                name: "Mr. Chen's Science Lab".to_string(),
                student_limit: 20,
            })
            .student(student(1, "Cam", "Alfonsi", false))
            .student(student(2, "Royce", "Palazzo", true))
            .student(student(3, "Ada", "Lovelace", true))
            .supply(1, supply(1, "Scissors", "Cutting", "left"))
            .supply(1, supply(2, "Paint Brush", "Painting", "any"))
            .supply(2, supply(3, "Beaker", "Glassware", "any"))
            .enroll(1, 1)
            .enroll(2, 1)
            .enroll(3, 1)
            .enroll(3, 2)
            .build()
    }
}

/// Builder for [`InMemoryRoster`]
#[derive(Debug, Default)]
pub struct InMemoryRosterBuilder {
    data: RosterData,
}

impl InMemoryRosterBuilder {
    /// Add a student
    #[must_use]
    pub fn student(mut self, student: Student) -> Self {
        self.data.students.push(student);
        self
    }

    /// Add a classroom
    #[must_use]
    pub fn classroom(mut self, classroom: Classroom) -> Self {
        self.data.classrooms.push(classroom);
        self
    }

    /// Add a supply owned by `classroom_id`
    #[must_use]
    pub fn supply(mut self, classroom_id: i32, supply: Supply) -> Self {
        self.data.supplies.push((classroom_id, supply));
        self
    }

    /// Record a membership of `student_id` in `classroom_id`
    #[must_use]
    pub fn enroll(mut self, student_id: i32, classroom_id: i32) -> Self {
        self.data.memberships.push((student_id, classroom_id));
        self
    }

    /// Finish building
    pub fn build(self) -> InMemoryRoster {
        InMemoryRoster {
            data: Arc::new(self.data),
        }
    }
}

impl ListRepository<Student> for InMemoryRoster {
    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        count_matching(&self.data.students, filters)
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        sort: SortSpec,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Student>> {
        select(&self.data.students, filters, sort, pagination)
    }
}

impl ListRepository<Classroom> for InMemoryRoster {
    async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
        count_matching(&self.data.classrooms, filters)
    }

    async fn find_all(
        &self,
        filters: &[FilterCondition],
        sort: SortSpec,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Classroom>> {
        select(&self.data.classrooms, filters, sort, pagination)
    }
}

impl ClassroomRepository for InMemoryRoster {
    async fn find_with_relations(&self, id: i32) -> RepositoryResult<Option<ClassroomWithRelations>> {
        let Some(classroom) = self.data.classrooms.iter().find(|c| c.id == id).cloned() else {
            return Ok(None);
        };

        let mut supplies: Vec<Supply> = self
            .data
            .supplies
            .iter()
            .filter(|(owner, _)| *owner == id)
            .map(|(_, supply)| supply.clone())
            .collect();
        sort_rows(&mut supplies, SUPPLY_ORDER);

        let mut students: Vec<Student> = self
            .data
            .memberships
            .iter()
            .filter(|(_, classroom_id)| *classroom_id == id)
            .filter_map(|(student_id, _)| self.data.students.iter().find(|s| s.id == *student_id))
            .cloned()
            .collect();
        sort_rows(&mut students, STUDENT_ORDER);

        Ok(Some(ClassroomWithRelations {
            classroom,
            supplies,
            students,
        }))
    }

    async fn supply_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
        Ok(self
            .data
            .supplies
            .iter()
            .filter(|(owner, _)| *owner == classroom_id)
            .count() as u64)
    }

    async fn student_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
        Ok(self
            .data
            .memberships
            .iter()
            .filter(|(_, owner)| *owner == classroom_id)
            .count() as u64)
    }
}

impl RosterSource for InMemoryRoster {
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
