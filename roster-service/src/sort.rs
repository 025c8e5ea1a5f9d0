//! Fixed sort specifications per collection
//!
//! The student order is shared by the people list and by the students nested
//! under a single classroom; supplies are only ever ordered inside a classroom.

use crate::repository::{OrderDirection, SortSpec};

/// People list and nested classroom students: last name, then first name
pub const STUDENT_ORDER: SortSpec = &[
    ("lastName", OrderDirection::Ascending),
    ("firstName", OrderDirection::Ascending),
];

/// Groups list: name
pub const CLASSROOM_ORDER: SortSpec = &[("name", OrderDirection::Ascending)];

/// Nested classroom supplies: category, then name
pub const SUPPLY_ORDER: SortSpec = &[
    ("category", OrderDirection::Ascending),
    ("name", OrderDirection::Ascending),
];
