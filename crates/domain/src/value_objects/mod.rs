//! Value Objects - Immutable, identity-less domain primitives

mod clock_time;
mod lecture_category;
mod lecture_date;
mod lecture_id;

pub use clock_time::ClockTime;
pub use lecture_category::LectureCategory;
pub use lecture_date::LectureDate;
pub use lecture_id::LectureId;
