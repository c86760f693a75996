//! Sample lectures for a fresh database
//!
//! The calendar front-end expects a few lectures to exist on first start.
//! Seeding only ever happens on an empty table.

use application::{error::ApplicationError, ports::LectureStore};
use chrono::Utc;
use domain::entities::{Lecture, Material, MaterialKind};
use domain::value_objects::{ClockTime, LectureCategory, LectureDate, LectureId};
use domain::DomainError;
use tracing::{debug, info, instrument};

struct SampleMaterial {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    url: &'static str,
}

struct SampleLecture {
    id: &'static str,
    title: &'static str,
    instructor: &'static str,
    description: &'static str,
    full_description: &'static str,
    start_time: &'static str,
    end_time: &'static str,
    date: &'static str,
    category: &'static str,
    location: &'static str,
    max_students: u32,
    enrolled_students: u32,
    materials: &'static [SampleMaterial],
}

const SAMPLE_LECTURES: [SampleLecture; 3] = [
    SampleLecture {
        id: "1",
        title: "Introduction to React Hooks",
        instructor: "Dr. Sarah Johnson",
        description: "Learn the fundamentals of React Hooks and how they revolutionize \
                      functional components.",
        full_description: "This comprehensive lecture covers useState, useEffect, useContext, \
                           and custom hooks. We'll build practical examples and explore best \
                           practices for modern React development.",
        start_time: "09:00",
        end_time: "10:30",
        date: "2025-01-15",
        category: "computer-science",
        location: "Room 201, CS Building",
        max_students: 45,
        enrolled_students: 32,
        materials: &[
            SampleMaterial {
                id: "1",
                name: "React Hooks Guide.pdf",
                kind: "pdf",
                url: "https://example.com/react-hooks-guide.pdf",
            },
            SampleMaterial {
                id: "2",
                name: "Code Examples",
                kind: "link",
                url: "https://github.com/example/react-hooks-examples",
            },
        ],
    },
    SampleLecture {
        id: "2",
        title: "Advanced Calculus: Integration Techniques",
        instructor: "Prof. Michael Chen",
        description: "Master advanced integration methods including integration by parts, \
                      partial fractions, and trigonometric substitution.",
        full_description: "This advanced mathematics lecture focuses on complex integration \
                           techniques used in engineering and physics applications. Students \
                           will solve challenging problems and learn when to apply each method.",
        start_time: "14:00",
        end_time: "15:30",
        date: "2025-01-16",
        category: "mathematics",
        location: "Mathematics Hall 101",
        max_students: 60,
        enrolled_students: 48,
        materials: &[SampleMaterial {
            id: "3",
            name: "Integration Techniques Handbook",
            kind: "pdf",
            url: "https://example.com/integration-handbook.pdf",
        }],
    },
    SampleLecture {
        id: "3",
        title: "Quantum Mechanics Fundamentals",
        instructor: "Dr. Emily Rodriguez",
        description: "Explore the fascinating world of quantum mechanics, covering \
                      wave-particle duality and the uncertainty principle.",
        full_description: "Introduction to quantum mechanics for physics majors. Topics include \
                           the Schrödinger equation, quantum states, observables, and measurement \
                           theory. Mathematical prerequisites include linear algebra and \
                           differential equations.",
        start_time: "11:00",
        end_time: "12:30",
        date: "2025-01-17",
        category: "physics",
        location: "Physics Laboratory A",
        max_students: 35,
        enrolled_students: 28,
        materials: &[
            SampleMaterial {
                id: "4",
                name: "Quantum Mechanics Lecture Notes",
                kind: "pdf",
                url: "https://example.com/quantum-notes.pdf",
            },
            SampleMaterial {
                id: "5",
                name: "Virtual Lab Simulation",
                kind: "link",
                url: "https://quantumlab.example.com",
            },
        ],
    },
];

impl SampleLecture {
    fn to_lecture(&self) -> Result<Lecture, DomainError> {
        let now = Utc::now();
        let materials = self
            .materials
            .iter()
            .map(|m| {
                Ok(Material::new(m.name, m.kind.parse::<MaterialKind>()?, m.url).with_id(m.id))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Lecture {
            id: LectureId::parse(self.id).unwrap_or_default(),
            title: self.title.to_string(),
            instructor: self.instructor.to_string(),
            description: self.description.to_string(),
            full_description: Some(self.full_description.to_string()),
            start_time: ClockTime::parse(self.start_time)?,
            end_time: ClockTime::parse(self.end_time)?,
            date: LectureDate::parse(self.date)?,
            category: self.category.parse::<LectureCategory>()?,
            location: Some(self.location.to_string()),
            max_students: Some(self.max_students),
            enrolled_students: self.enrolled_students,
            materials,
            created_at: now,
            updated_at: now,
        })
    }
}

/// The built-in sample lectures
///
/// # Errors
///
/// Returns an error only if the built-in data is malformed.
pub fn sample_lectures() -> Result<Vec<Lecture>, DomainError> {
    SAMPLE_LECTURES.iter().map(SampleLecture::to_lecture).collect()
}

/// Insert the sample lectures if, and only if, the store is empty
///
/// Returns the number of lectures inserted.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
#[instrument(skip(store))]
pub async fn seed_sample_lectures(store: &dyn LectureStore) -> Result<usize, ApplicationError> {
    let existing = store.count().await?;
    if existing > 0 {
        debug!(existing, "Lectures present, skipping sample data");
        return Ok(0);
    }

    let lectures = sample_lectures()?;
    for lecture in &lectures {
        store.save(lecture).await?;
    }

    info!(count = lectures.len(), "Seeded sample lectures");
    Ok(lectures.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_is_well_formed() {
        let lectures = sample_lectures().unwrap();
        assert_eq!(lectures.len(), 3);
        assert_eq!(
            lectures.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert!(lectures.iter().all(Lecture::has_valid_schedule));
        assert_eq!(lectures[0].materials[0].kind, MaterialKind::Document);
        assert_eq!(lectures[2].materials[1].kind, MaterialKind::Link);
        assert_eq!(lectures[1].enrolled_students, 48);
    }
}
