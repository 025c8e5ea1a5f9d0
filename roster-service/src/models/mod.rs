//! Roster data models
//!
//! Row shapes for the four tables the service reads. Serialized field names
//! match the public JSON contract (`firstName`, `studentLimit`, ...).

mod classroom;
mod student;
mod supply;

pub use classroom::{Classroom, ClassroomWithRelations};
pub use student::Student;
pub use supply::Supply;
