//! SQLite-based lecture persistence using sqlx

use application::{
    error::ApplicationError,
    ports::{LectureQuery, LectureStore},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{Lecture, Material};
use domain::value_objects::{ClockTime, LectureCategory, LectureDate, LectureId};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

use super::error::{map_corrupt_row, map_sqlx_error};

const SELECT_LECTURES: &str = "SELECT id, title, instructor, description, full_description, \
     start_time, end_time, date, category, location, max_students, enrolled_students, \
     materials, created_at, updated_at FROM lectures";

/// SQLite-based lecture store
#[derive(Debug, Clone)]
pub struct SqliteLectureStore {
    pool: SqlitePool,
}

impl SqliteLectureStore {
    /// Create a new SQLite lecture store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LectureStore for SqliteLectureStore {
    #[instrument(skip(self, lecture), fields(lecture_id = %lecture.id))]
    async fn save(&self, lecture: &Lecture) -> Result<(), ApplicationError> {
        let materials = encode_materials(&lecture.materials)?;

        sqlx::query(
            r"
            INSERT INTO lectures (
                id, title, instructor, description, full_description,
                start_time, end_time, date, category, location,
                max_students, enrolled_students, materials, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(lecture.id.as_str())
        .bind(&lecture.title)
        .bind(&lecture.instructor)
        .bind(&lecture.description)
        .bind(&lecture.full_description)
        .bind(lecture.start_time.to_string())
        .bind(lecture.end_time.to_string())
        .bind(lecture.date.to_string())
        .bind(lecture.category.as_str())
        .bind(&lecture.location)
        .bind(lecture.max_students.map(i64::from))
        .bind(i64::from(lecture.enrolled_students))
        .bind(materials)
        .bind(lecture.created_at.to_rfc3339())
        .bind(lecture.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("Saved lecture");
        Ok(())
    }

    #[instrument(skip(self), fields(lecture_id = %id))]
    async fn get(&self, id: &LectureId) -> Result<Option<Lecture>, ApplicationError> {
        let row: Option<LectureRow> = sqlx::query_as(&format!("{SELECT_LECTURES} WHERE id = $1"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(LectureRow::into_lecture).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &LectureQuery) -> Result<Vec<Lecture>, ApplicationError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_LECTURES);
        let mut keyword = " WHERE ";

        if let Some(from) = query.from {
            builder.push(keyword).push("date >= ").push_bind(from.to_string());
            keyword = " AND ";
        }
        if let Some(to) = query.to {
            builder.push(keyword).push("date <= ").push_bind(to.to_string());
        }
        builder.push(" ORDER BY date ASC, start_time ASC");

        let rows: Vec<LectureRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Fetched lectures");
        rows.into_iter().map(LectureRow::into_lecture).collect()
    }

    #[instrument(skip(self, lecture), fields(lecture_id = %lecture.id))]
    async fn update(&self, lecture: &Lecture) -> Result<(), ApplicationError> {
        let materials = encode_materials(&lecture.materials)?;

        let result = sqlx::query(
            r"
            UPDATE lectures SET
                title = $1, instructor = $2, description = $3, full_description = $4,
                start_time = $5, end_time = $6, date = $7, category = $8, location = $9,
                max_students = $10, enrolled_students = $11, materials = $12, updated_at = $13
            WHERE id = $14
            ",
        )
        .bind(&lecture.title)
        .bind(&lecture.instructor)
        .bind(&lecture.description)
        .bind(&lecture.full_description)
        .bind(lecture.start_time.to_string())
        .bind(lecture.end_time.to_string())
        .bind(lecture.date.to_string())
        .bind(lecture.category.as_str())
        .bind(&lecture.location)
        .bind(lecture.max_students.map(i64::from))
        .bind(i64::from(lecture.enrolled_students))
        .bind(materials)
        .bind(lecture.updated_at.to_rfc3339())
        .bind(lecture.id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound(format!("Lecture {}", lecture.id)));
        }

        debug!("Updated lecture");
        Ok(())
    }

    #[instrument(skip(self), fields(lecture_id = %id))]
    async fn delete(&self, id: &LectureId) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let deleted = result.rows_affected() > 0;
        debug!(deleted, "Deleted lecture");
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ApplicationError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lectures")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Row type for lecture queries
#[derive(sqlx::FromRow)]
struct LectureRow {
    id: String,
    title: String,
    instructor: String,
    description: String,
    full_description: Option<String>,
    start_time: String,
    end_time: String,
    date: String,
    category: String,
    location: Option<String>,
    max_students: Option<i64>,
    enrolled_students: i64,
    materials: String,
    created_at: String,
    updated_at: String,
}

impl LectureRow {
    fn into_lecture(self) -> Result<Lecture, ApplicationError> {
        let id = LectureId::parse(&self.id).ok_or_else(|| map_corrupt_row("id", "empty id"))?;
        let materials: Vec<Material> =
            serde_json::from_str(&self.materials).map_err(|e| map_corrupt_row("materials", e))?;
        let max_students = self
            .max_students
            .map(u32::try_from)
            .transpose()
            .map_err(|e| map_corrupt_row("max_students", e))?;

        Ok(Lecture {
            id,
            title: self.title,
            instructor: self.instructor,
            description: self.description,
            full_description: self.full_description,
            start_time: ClockTime::parse(&self.start_time)
                .map_err(|e| map_corrupt_row("start_time", e))?,
            end_time: ClockTime::parse(&self.end_time)
                .map_err(|e| map_corrupt_row("end_time", e))?,
            date: LectureDate::parse(&self.date).map_err(|e| map_corrupt_row("date", e))?,
            category: self
                .category
                .parse::<LectureCategory>()
                .map_err(|e| map_corrupt_row("category", e))?,
            location: self.location,
            max_students,
            enrolled_students: u32::try_from(self.enrolled_students)
                .map_err(|e| map_corrupt_row("enrolled_students", e))?,
            materials,
            created_at: parse_datetime("created_at", &self.created_at)?,
            updated_at: parse_datetime("updated_at", &self.updated_at)?,
        })
    }
}

fn encode_materials(materials: &[Material]) -> Result<String, ApplicationError> {
    serde_json::to_string(materials)
        .map_err(|e| ApplicationError::Internal(format!("Failed to encode materials: {e}")))
}

/// Parse an RFC3339 datetime string
fn parse_datetime(column: &str, s: &str) -> Result<DateTime<Utc>, ApplicationError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| map_corrupt_row(column, e))
}
