//! Domain entities - Objects with identity and lifecycle

mod lecture;
mod lecture_patch;
mod material;

pub use lecture::{Lecture, NewLecture};
pub use lecture_patch::{FieldChange, LectureField, LecturePatch};
pub use material::{Material, MaterialKind};
