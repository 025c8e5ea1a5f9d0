use serde::{Deserialize, Serialize};

use super::{Student, Supply};

/// A group on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[cfg_attr(feature = "database", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: i32,
    pub name: String,
    pub student_limit: i32,
}

/// A classroom loaded together with its related collections
///
/// `supplies` is ordered by category then name and `students` by last name
/// then first name; each collection is ordered independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassroomWithRelations {
    pub classroom: Classroom,
    pub supplies: Vec<Supply>,
    pub students: Vec<Student>,
}
