//! Lecture entity - A scheduled teaching event on the calendar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::{
    errors::DomainError,
    value_objects::{ClockTime, LectureCategory, LectureDate, LectureId},
};

/// Validated data for a lecture that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecture {
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub full_description: Option<String>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub date: LectureDate,
    pub category: LectureCategory,
    pub location: Option<String>,
    pub max_students: Option<u32>,
    pub materials: Vec<Material>,
}

/// A lecture on the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    /// Unique identifier
    pub id: LectureId,
    /// Short title
    pub title: String,
    /// Who gives the lecture
    pub instructor: String,
    /// One-paragraph summary
    pub description: String,
    /// Optional long-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    /// Start time (wall clock)
    pub start_time: ClockTime,
    /// End time (wall clock)
    pub end_time: ClockTime,
    /// Day of the lecture
    pub date: LectureDate,
    /// Subject area
    pub category: LectureCategory,
    /// Room or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Capacity limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    /// Number of enrolled students
    #[serde(default)]
    pub enrolled_students: u32,
    /// Attached materials, in display order
    #[serde(default)]
    pub materials: Vec<Material>,
    /// When this lecture was created
    pub created_at: DateTime<Utc>,
    /// When this lecture was last modified
    pub updated_at: DateTime<Utc>,
}

impl Lecture {
    /// Create a lecture from validated data
    ///
    /// Assigns a fresh id, stamps both timestamps with the same instant and
    /// starts with no enrolments.
    #[must_use]
    pub fn create(new: NewLecture) -> Self {
        let now = Utc::now();
        Self {
            id: LectureId::new(),
            title: new.title,
            instructor: new.instructor,
            description: new.description,
            full_description: new.full_description,
            start_time: new.start_time,
            end_time: new.end_time,
            date: new.date,
            category: new.category,
            location: new.location,
            max_students: new.max_students,
            enrolled_students: 0,
            materials: new.materials,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the lecture starts strictly before it ends
    #[must_use]
    pub fn has_valid_schedule(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Fail unless the lecture starts strictly before it ends
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchedule` otherwise.
    pub fn ensure_valid_schedule(&self) -> Result<(), DomainError> {
        if self.has_valid_schedule() {
            Ok(())
        } else {
            Err(DomainError::InvalidSchedule {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            })
        }
    }

    /// Mark the lecture as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Lecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} {} ({})",
            self.date, self.start_time, self.end_time, self.title, self.instructor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MaterialKind;

    fn sample_new_lecture() -> NewLecture {
        NewLecture {
            title: "Quantum Mechanics Fundamentals".to_string(),
            instructor: "Dr. Emily Rodriguez".to_string(),
            description: "Wave-particle duality".to_string(),
            full_description: None,
            start_time: ClockTime::parse("11:00").unwrap(),
            end_time: ClockTime::parse("12:30").unwrap(),
            date: LectureDate::parse("2025-01-17").unwrap(),
            category: LectureCategory::Physics,
            location: Some("Physics Laboratory A".to_string()),
            max_students: Some(35),
            materials: vec![Material::new(
                "Lecture Notes",
                MaterialKind::Document,
                "https://example.com/quantum-notes.pdf",
            )],
        }
    }

    #[test]
    fn create_assigns_identity_and_timestamps() {
        let lecture = Lecture::create(sample_new_lecture());
        assert!(!lecture.id.as_str().is_empty());
        assert_eq!(lecture.created_at, lecture.updated_at);
        assert_eq!(lecture.enrolled_students, 0);
        assert_eq!(lecture.materials.len(), 1);
    }

    #[test]
    fn create_yields_distinct_ids() {
        let a = Lecture::create(sample_new_lecture());
        let b = Lecture::create(sample_new_lecture());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn schedule_validity() {
        let mut lecture = Lecture::create(sample_new_lecture());
        assert!(lecture.has_valid_schedule());
        assert!(lecture.ensure_valid_schedule().is_ok());

        lecture.end_time = lecture.start_time;
        assert!(!lecture.has_valid_schedule());

        lecture.end_time = ClockTime::parse("9:00").unwrap();
        let err = lecture.ensure_valid_schedule().unwrap_err();
        assert!(matches!(err, DomainError::InvalidSchedule { .. }));
    }

    #[test]
    fn serializes_camel_case_and_omits_empty_optionals() {
        let mut lecture = Lecture::create(sample_new_lecture());
        lecture.max_students = None;
        let json = serde_json::to_value(&lecture).unwrap();

        assert_eq!(json["startTime"], "11:00");
        assert_eq!(json["endTime"], "12:30");
        assert_eq!(json["date"], "2025-01-17");
        assert_eq!(json["category"], "physics");
        assert_eq!(json["enrolledStudents"], 0);
        assert!(json["createdAt"].is_string());
        assert!(json.get("fullDescription").is_none());
        assert!(json.get("maxStudents").is_none());
        assert_eq!(json["materials"][0]["type"], "document");
    }

    #[test]
    fn display_format() {
        let lecture = Lecture::create(sample_new_lecture());
        let display = lecture.to_string();
        assert!(display.contains("2025-01-17"));
        assert!(display.contains("11:00-12:30"));
        assert!(display.contains("Quantum Mechanics Fundamentals"));
    }
}
