//! Typed partial updates for lectures

use std::fmt;

use super::{lecture::Lecture, material::Material};
use crate::value_objects::{ClockTime, LectureCategory, LectureDate};

/// The fields of a lecture that may be changed after creation
///
/// `id`, `enrolledStudents` and the timestamps are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LectureField {
    Title,
    Instructor,
    Description,
    FullDescription,
    StartTime,
    EndTime,
    Date,
    Category,
    Location,
    MaxStudents,
    Materials,
}

impl LectureField {
    /// Every updatable field, in declaration order
    pub const ALL: [Self; 11] = [
        Self::Title,
        Self::Instructor,
        Self::Description,
        Self::FullDescription,
        Self::StartTime,
        Self::EndTime,
        Self::Date,
        Self::Category,
        Self::Location,
        Self::MaxStudents,
        Self::Materials,
    ];

    /// Wire (camelCase) name of the field
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Instructor => "instructor",
            Self::Description => "description",
            Self::FullDescription => "fullDescription",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
            Self::Date => "date",
            Self::Category => "category",
            Self::Location => "location",
            Self::MaxStudents => "maxStudents",
            Self::Materials => "materials",
        }
    }

    /// Whether a lecture must always carry a value for this field
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Title
                | Self::Instructor
                | Self::Description
                | Self::StartTime
                | Self::EndTime
                | Self::Date
                | Self::Category
        )
    }
}

impl fmt::Display for LectureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field assignment
///
/// Optional columns carry an `Option` so they can be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    Instructor(String),
    Description(String),
    FullDescription(Option<String>),
    StartTime(ClockTime),
    EndTime(ClockTime),
    Date(LectureDate),
    Category(LectureCategory),
    Location(Option<String>),
    MaxStudents(Option<u32>),
    Materials(Vec<Material>),
}

impl FieldChange {
    /// The field this change targets
    #[must_use]
    pub const fn field(&self) -> LectureField {
        match self {
            Self::Title(_) => LectureField::Title,
            Self::Instructor(_) => LectureField::Instructor,
            Self::Description(_) => LectureField::Description,
            Self::FullDescription(_) => LectureField::FullDescription,
            Self::StartTime(_) => LectureField::StartTime,
            Self::EndTime(_) => LectureField::EndTime,
            Self::Date(_) => LectureField::Date,
            Self::Category(_) => LectureField::Category,
            Self::Location(_) => LectureField::Location,
            Self::MaxStudents(_) => LectureField::MaxStudents,
            Self::Materials(_) => LectureField::Materials,
        }
    }

    fn apply_to(self, lecture: &mut Lecture) {
        match self {
            Self::Title(v) => lecture.title = v,
            Self::Instructor(v) => lecture.instructor = v,
            Self::Description(v) => lecture.description = v,
            Self::FullDescription(v) => lecture.full_description = v,
            Self::StartTime(v) => lecture.start_time = v,
            Self::EndTime(v) => lecture.end_time = v,
            Self::Date(v) => lecture.date = v,
            Self::Category(v) => lecture.category = v,
            Self::Location(v) => lecture.location = v,
            Self::MaxStudents(v) => lecture.max_students = v,
            Self::Materials(v) => lecture.materials = v,
        }
    }
}

/// A set of field changes, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LecturePatch {
    changes: Vec<FieldChange>,
}

impl LecturePatch {
    /// Create an empty patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change, replacing any earlier change to the same field
    #[must_use]
    pub fn with(mut self, change: FieldChange) -> Self {
        self.set(change);
        self
    }

    /// Add a change in place, replacing any earlier change to the same field
    pub fn set(&mut self, change: FieldChange) {
        let field = change.field();
        self.changes.retain(|c| c.field() != field);
        self.changes.push(change);
    }

    /// Fields touched by this patch, in field order
    #[must_use]
    pub fn fields(&self) -> Vec<LectureField> {
        let mut fields: Vec<_> = self.changes.iter().map(FieldChange::field).collect();
        fields.sort_unstable();
        fields
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Apply every change and refresh the update timestamp
    ///
    /// The timestamp is refreshed even for an empty patch.
    pub fn apply(self, lecture: &mut Lecture) {
        for change in self.changes {
            change.apply_to(lecture);
        }
        lecture.touch();
    }
}
