//! Derived fields for a single classroom

use super::response::ClassroomDetail;
use crate::models::ClassroomWithRelations;

/// Attach related counts and the overload flag to a loaded classroom
///
/// A classroom is overloaded only when strictly more students are enrolled
/// than its limit allows.
pub fn enrich(
    relations: ClassroomWithRelations,
    supply_count: u64,
    student_count: u64,
) -> ClassroomDetail {
    let ClassroomWithRelations {
        classroom,
        supplies,
        students,
    } = relations;

    // A negative limit is exceeded by any count
    let overloaded =
        u64::try_from(classroom.student_limit).map_or(true, |limit| student_count > limit);

    ClassroomDetail {
        classroom,
        supply_count,
        student_count,
        overloaded,
        supplies,
        students,
    }
}
