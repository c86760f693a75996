//! Lecture service
//!
//! Use cases for the lecture calendar: listing, lookup, creation, partial
//! update and deletion. Input is validated here so that an update of an
//! unknown lecture is reported as not found before its body is examined.

use std::{fmt, sync::Arc};

use domain::entities::{Lecture, LectureField};
use domain::value_objects::LectureId;
use tracing::{debug, info, instrument, warn};
use validator::{ValidationError, ValidationErrors};

use crate::{
    error::ApplicationError,
    lecture_input::{LectureChanges, LectureDraft},
    ports::{LectureQuery, LectureStore},
};

/// Configuration for the lecture service
#[derive(Debug, Clone, Default)]
pub struct LectureServiceConfig {
    /// Reject lectures whose start time is not before their end time
    pub enforce_time_order: bool,
}

/// Service for managing lectures
pub struct LectureService {
    store: Arc<dyn LectureStore>,
    config: LectureServiceConfig,
}

impl fmt::Debug for LectureService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LectureService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Clone for LectureService {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl LectureService {
    /// Create a new lecture service
    #[must_use]
    pub fn new(store: Arc<dyn LectureStore>, config: LectureServiceConfig) -> Self {
        Self { store, config }
    }

    /// List lectures ordered by date, then start time
    #[instrument(skip(self))]
    pub async fn list(&self, query: LectureQuery) -> Result<Vec<Lecture>, ApplicationError> {
        let lectures = self.store.list(&query).await?;
        debug!(count = lectures.len(), "Listed lectures");
        Ok(lectures)
    }

    /// Get a single lecture
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get(&self, id: &LectureId) -> Result<Lecture, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Validate a draft and store it as a new lecture
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: LectureDraft) -> Result<Lecture, ApplicationError> {
        let new = draft.validate_into().map_err(|errors| {
            debug!(?errors, "Rejected lecture draft");
            ApplicationError::Validation(errors)
        })?;

        let lecture = Lecture::create(new);
        self.check_schedule(&lecture)?;
        self.store.save(&lecture).await?;

        info!(id = %lecture.id, title = %lecture.title, date = %lecture.date, "Created lecture");
        Ok(lecture)
    }

    /// Apply a partial update to an existing lecture
    ///
    /// Existence is checked before the changes are validated.
    #[instrument(skip(self, id, changes), fields(id = %id))]
    pub async fn update(
        &self,
        id: &LectureId,
        changes: LectureChanges,
    ) -> Result<Lecture, ApplicationError> {
        let mut lecture = self.store.get(id).await?.ok_or_else(|| not_found(id))?;

        let patch = changes.validate_into().map_err(|errors| {
            debug!(?errors, "Rejected lecture changes");
            ApplicationError::Validation(errors)
        })?;
        let changed: Vec<&str> = patch.fields().iter().map(LectureField::as_str).collect();

        patch.apply(&mut lecture);
        self.check_schedule(&lecture)?;
        self.store.update(&lecture).await?;

        info!(fields = ?changed, "Updated lecture");
        Ok(lecture)
    }

    /// Delete a lecture
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete(&self, id: &LectureId) -> Result<(), ApplicationError> {
        if self.store.delete(id).await? {
            info!("Deleted lecture");
            Ok(())
        } else {
            warn!("Attempted to delete unknown lecture");
            Err(not_found(id))
        }
    }

    fn check_schedule(&self, lecture: &Lecture) -> Result<(), ApplicationError> {
        if !self.config.enforce_time_order {
            return Ok(());
        }

        lecture.ensure_valid_schedule().map_err(|e| {
            let mut error = ValidationError::new("invalid_schedule");
            error.message = Some(e.to_string().into());
            let mut errors = ValidationErrors::new();
            errors.add(LectureField::EndTime.as_str(), error);
            ApplicationError::Validation(errors)
        })
    }
}

fn not_found(id: &LectureId) -> ApplicationError {
    ApplicationError::NotFound(format!("Lecture {id}"))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use domain::entities::NewLecture;
    use domain::value_objects::{ClockTime, LectureCategory, LectureDate};

    use super::*;
    use crate::lecture_input::missing_fields;
    use crate::ports::MockLectureStore;

    fn service(mock: MockLectureStore) -> LectureService {
        LectureService::new(Arc::new(mock), LectureServiceConfig::default())
    }

    fn strict_service(mock: MockLectureStore) -> LectureService {
        LectureService::new(
            Arc::new(mock),
            LectureServiceConfig {
                enforce_time_order: true,
            },
        )
    }

    fn draft() -> LectureDraft {
        LectureDraft {
            title: Some("Advanced Calculus: Integration Techniques".to_string()),
            instructor: Some("Prof. Michael Chen".to_string()),
            description: Some("Integration by parts".to_string()),
            start_time: Some("14:00".to_string()),
            end_time: Some("15:30".to_string()),
            date: Some("2025-01-16".to_string()),
            category: Some("mathematics".to_string()),
            ..Default::default()
        }
    }

    fn stored_lecture() -> Lecture {
        let mut lecture = Lecture::create(NewLecture {
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
            materials: vec![],
        });
        lecture.enrolled_students = 28;
        lecture.created_at = Utc::now() - Duration::days(2);
        lecture.updated_at = lecture.created_at;
        lecture
    }

    #[tokio::test]
    async fn create_saves_and_returns_lecture() {
        let mut mock = MockLectureStore::new();
        mock.expect_save().times(1).returning(|_| Ok(()));

        let lecture = service(mock).create(draft()).await.unwrap();

        assert_eq!(lecture.title, "Advanced Calculus: Integration Techniques");
        assert_eq!(lecture.enrolled_students, 0);
        assert_eq!(lecture.created_at, lecture.updated_at);
    }

    #[tokio::test]
    async fn create_with_missing_fields_does_not_touch_store() {
        let mock = MockLectureStore::new();
        let input = LectureDraft {
            title: None,
            ..draft()
        };

        let err = service(mock).create(input).await.unwrap_err();

        match err {
            ApplicationError::Validation(errors) => {
                assert_eq!(missing_fields(&errors), vec!["title"]);
            },
            other => unreachable!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reversed_times_accepted_by_default() {
        let mut mock = MockLectureStore::new();
        mock.expect_save().times(1).returning(|_| Ok(()));
        let input = LectureDraft {
            start_time: Some("10:00".to_string()),
            end_time: Some("09:00".to_string()),
            ..draft()
        };

        assert!(service(mock).create(input).await.is_ok());
    }

    #[tokio::test]
    async fn reversed_times_rejected_when_enforced() {
        let mock = MockLectureStore::new();
        let input = LectureDraft {
            start_time: Some("10:00".to_string()),
            end_time: Some("09:00".to_string()),
            ..draft()
        };

        let err = strict_service(mock).create(input).await.unwrap_err();
        match err {
            ApplicationError::Validation(errors) => {
                let field_errors = errors.field_errors();
                let end = &field_errors["endTime"][0];
                assert_eq!(end.code, "invalid_schedule");
                assert_eq!(
                    end.message.as_deref(),
                    Some("Invalid schedule: start time 10:00 must be before end time 09:00")
                );
            },
            other => unreachable!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_lecture_is_not_found() {
        let mut mock = MockLectureStore::new();
        mock.expect_get().times(1).returning(|_| Ok(None));

        let err = service(mock).get(&LectureId::new()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_applies_patch_and_refreshes_timestamp() {
        let mut mock = MockLectureStore::new();
        let existing = stored_lecture();
        let id = existing.id.clone();
        let before = existing.clone();

        mock.expect_get()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_update().times(1).returning(|_| Ok(()));

        let changes = LectureChanges {
            title: Some("Quantum Mechanics II".to_string()),
            location: Some(None),
            ..Default::default()
        };
        let updated = service(mock).update(&id, changes).await.unwrap();

        assert_eq!(updated.title, "Quantum Mechanics II");
        assert!(updated.location.is_none());
        assert_eq!(updated.instructor, before.instructor);
        assert_eq!(updated.enrolled_students, 28);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn update_of_unknown_lecture_is_not_found_before_validation() {
        let mut mock = MockLectureStore::new();
        mock.expect_get().times(1).returning(|_| Ok(None));

        let changes = LectureChanges {
            start_time: Some("not a time".to_string()),
            ..Default::default()
        };
        let err = service(mock)
            .update(&LectureId::new(), changes)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_with_invalid_time_is_rejected() {
        let mut mock = MockLectureStore::new();
        let existing = stored_lecture();
        let id = existing.id.clone();
        mock.expect_get()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let changes = LectureChanges {
            start_time: Some("7pm".to_string()),
            ..Default::default()
        };
        let err = service(mock).update(&id, changes).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_reports_not_found() {
        let mut mock = MockLectureStore::new();
        mock.expect_delete().times(1).returning(|_| Ok(false));

        let err = service(mock).delete(&LectureId::new()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_existing_lecture() {
        let mut mock = MockLectureStore::new();
        mock.expect_delete().times(1).returning(|_| Ok(true));

        assert!(service(mock).delete(&LectureId::new()).await.is_ok());
    }

    #[tokio::test]
    async fn list_passes_query_to_store() {
        let mut mock = MockLectureStore::new();
        let from = LectureDate::parse("2025-01-16").unwrap();
        let lecture = stored_lecture();
        mock.expect_list()
            .withf(move |q| q.from == Some(from) && q.to.is_none())
            .times(1)
            .returning(move |_| Ok(vec![lecture.clone()]));

        let lectures = service(mock)
            .list(LectureQuery::all().with_from(from))
            .await
            .unwrap();
        assert_eq!(lectures.len(), 1);
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let mut mock = MockLectureStore::new();
        mock.expect_list()
            .returning(|_| Err(ApplicationError::Internal("database is locked".to_string())));

        let err = service(mock).list(LectureQuery::all()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}
