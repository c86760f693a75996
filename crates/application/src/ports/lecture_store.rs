//! Lecture storage port
//!
//! Defines the interface for persisting and querying lectures.
//! Adapters in the infrastructure layer implement this port using SQLite.

use async_trait::async_trait;
use domain::entities::Lecture;
use domain::value_objects::{LectureDate, LectureId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Query options for listing lectures
///
/// Both bounds are inclusive and independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LectureQuery {
    /// Earliest date to include
    pub from: Option<LectureDate>,
    /// Latest date to include
    pub to: Option<LectureDate>,
}

impl LectureQuery {
    /// A query returning every lecture
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A query for an inclusive date range
    #[must_use]
    pub const fn between(from: LectureDate, to: LectureDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Set the lower bound
    #[must_use]
    pub const fn with_from(mut self, from: LectureDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the upper bound
    #[must_use]
    pub const fn with_to(mut self, to: LectureDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Whether the query filters on date at all
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Port for lecture persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LectureStore: Send + Sync {
    /// Insert a new lecture
    async fn save(&self, lecture: &Lecture) -> Result<(), ApplicationError>;

    /// Get a lecture by ID
    async fn get(&self, id: &LectureId) -> Result<Option<Lecture>, ApplicationError>;

    /// List lectures ordered by date, then start time
    async fn list(&self, query: &LectureQuery) -> Result<Vec<Lecture>, ApplicationError>;

    /// Overwrite an existing lecture
    ///
    /// Fails with `NotFound` if no row has the lecture's ID.
    async fn update(&self, lecture: &Lecture) -> Result<(), ApplicationError>;

    /// Delete a lecture, returning whether a row was removed
    async fn delete(&self, id: &LectureId) -> Result<bool, ApplicationError>;

    /// Count all stored lectures
    async fn count(&self) -> Result<u64, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn LectureStore) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LectureStore>();
    }

    #[test]
    fn default_query_is_unbounded() {
        assert!(LectureQuery::all().is_unbounded());
    }

    #[test]
    fn builders_set_bounds() {
        let from = LectureDate::parse("2025-01-15").unwrap();
        let to = LectureDate::parse("2025-01-16").unwrap();

        let query = LectureQuery::all().with_from(from);
        assert_eq!(query.from, Some(from));
        assert!(query.to.is_none());
        assert!(!query.is_unbounded());

        assert_eq!(LectureQuery::between(from, to), query.with_to(to));
    }
}
