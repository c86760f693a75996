//! Lecture handlers
//!
//! REST endpoints for creating, reading, updating and deleting lectures.

use application::{LectureChanges, LectureDraft, LectureQuery, MaterialDraft};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use domain::{Lecture, LectureDate, LectureId, Material};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, FieldError},
    middleware::JsonBody,
    state::AppState,
};

// ---------------------------------------------------------------------------
// Response / request DTOs
// ---------------------------------------------------------------------------

/// Material attached to a lecture
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "1",
    "name": "React Hooks Guide.pdf",
    "type": "document",
    "url": "https://example.com/react-hooks-guide.pdf"
}))]
pub struct MaterialResponse {
    /// Material ID, unique within the lecture
    pub id: String,
    /// Display name
    pub name: String,
    /// `document`, `image` or `link`
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource location
    pub url: String,
}

impl From<Material> for MaterialResponse {
    fn from(material: Material) -> Self {
        Self {
            id: material.id,
            name: material.name,
            kind: material.kind.to_string(),
            url: material.url,
        }
    }
}

/// A lecture as returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "1",
    "title": "Introduction to React Hooks",
    "instructor": "Dr. Sarah Johnson",
    "description": "Learn the fundamentals of React Hooks.",
    "startTime": "09:00",
    "endTime": "10:30",
    "date": "2025-01-15",
    "category": "computer-science",
    "location": "Room 201, Computer Science Building",
    "maxStudents": 45,
    "enrolledStudents": 38,
    "materials": [],
    "createdAt": "2025-01-01T10:00:00Z",
    "updatedAt": "2025-01-01T10:00:00Z"
}))]
pub struct LectureResponse {
    /// Lecture ID
    pub id: String,
    /// Short title
    pub title: String,
    /// Who gives the lecture
    pub instructor: String,
    /// One-paragraph summary
    pub description: String,
    /// Long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
    /// Day of the lecture (YYYY-MM-DD)
    pub date: String,
    /// Category slug
    pub category: String,
    /// Room or address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Capacity limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    /// Number of enrolled students
    pub enrolled_students: u32,
    /// Attached materials
    pub materials: Vec<MaterialResponse>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        Self {
            id: lecture.id.to_string(),
            title: lecture.title,
            instructor: lecture.instructor,
            description: lecture.description,
            full_description: lecture.full_description,
            start_time: lecture.start_time.to_string(),
            end_time: lecture.end_time.to_string(),
            date: lecture.date.to_string(),
            category: lecture.category.as_str().to_string(),
            location: lecture.location,
            max_students: lecture.max_students,
            enrolled_students: lecture.enrolled_students,
            materials: lecture.materials.into_iter().map(Into::into).collect(),
            created_at: lecture.created_at,
            updated_at: lecture.updated_at,
        }
    }
}

/// Material in a create or update body
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Code Examples",
    "type": "link",
    "url": "https://github.com/example/react-hooks-examples"
}))]
pub struct MaterialRequest {
    /// Existing ID, generated when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// `document`, `image` or `link` (`pdf` is accepted as `document`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Resource location
    #[serde(default)]
    pub url: String,
}

impl From<MaterialRequest> for MaterialDraft {
    fn from(req: MaterialRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            kind: req.kind,
            url: req.url,
        }
    }
}

/// Create lecture request body
///
/// Every field is optional at the JSON level so that all missing required
/// fields can be reported together.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "title": "Introduction to React Hooks",
    "instructor": "Dr. Sarah Johnson",
    "description": "Learn the fundamentals of React Hooks.",
    "startTime": "09:00",
    "endTime": "10:30",
    "date": "2025-01-15",
    "category": "computer-science",
    "location": "Room 201",
    "maxStudents": 45
}))]
pub struct CreateLectureRequest {
    /// Short title (required)
    #[serde(default)]
    pub title: Option<String>,
    /// Instructor name (required)
    #[serde(default)]
    pub instructor: Option<String>,
    /// Summary (required)
    #[serde(default)]
    pub description: Option<String>,
    /// Long-form description
    #[serde(default)]
    pub full_description: Option<String>,
    /// Start time, HH:MM (required)
    #[serde(default)]
    pub start_time: Option<String>,
    /// End time, HH:MM (required)
    #[serde(default)]
    pub end_time: Option<String>,
    /// Day, YYYY-MM-DD (required)
    #[serde(default)]
    pub date: Option<String>,
    /// Category slug (required)
    #[serde(default)]
    pub category: Option<String>,
    /// Room or address
    #[serde(default)]
    pub location: Option<String>,
    /// Capacity limit
    #[serde(default)]
    pub max_students: Option<u32>,
    /// Attached materials
    #[serde(default)]
    pub materials: Option<Vec<MaterialRequest>>,
}

impl From<CreateLectureRequest> for LectureDraft {
    fn from(req: CreateLectureRequest) -> Self {
        Self {
            title: req.title,
            instructor: req.instructor,
            description: req.description,
            full_description: req.full_description,
            start_time: req.start_time,
            end_time: req.end_time,
            date: req.date,
            category: req.category,
            location: req.location,
            max_students: req.max_students,
            materials: req
                .materials
                .map(|list| list.into_iter().map(Into::into).collect()),
        }
    }
}

/// Update lecture request body (all fields optional)
///
/// An absent field is left unchanged. `null` clears `fullDescription`,
/// `location` and `maxStudents`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "title": "Advanced React Hooks",
    "startTime": "13:00",
    "location": null
}))]
pub struct UpdateLectureRequest {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New instructor
    #[serde(default)]
    pub instructor: Option<String>,
    /// New summary
    #[serde(default)]
    pub description: Option<String>,
    /// New long-form description, `null` clears it
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub full_description: Option<Option<String>>,
    /// New start time
    #[serde(default)]
    pub start_time: Option<String>,
    /// New end time
    #[serde(default)]
    pub end_time: Option<String>,
    /// New day
    #[serde(default)]
    pub date: Option<String>,
    /// New category slug
    #[serde(default)]
    pub category: Option<String>,
    /// New location, `null` clears it
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub location: Option<Option<String>>,
    /// New capacity, `null` clears it
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<u32>, nullable)]
    pub max_students: Option<Option<u32>>,
    /// Replacement material list
    #[serde(default)]
    pub materials: Option<Vec<MaterialRequest>>,
}

impl From<UpdateLectureRequest> for LectureChanges {
    fn from(req: UpdateLectureRequest) -> Self {
        Self {
            title: req.title,
            instructor: req.instructor,
            description: req.description,
            full_description: req.full_description,
            start_time: req.start_time,
            end_time: req.end_time,
            date: req.date,
            category: req.category,
            location: req.location,
            max_students: req.max_students,
            materials: req
                .materials
                .map(|list| list.into_iter().map(Into::into).collect()),
        }
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// List lectures query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListLecturesQuery {
    /// Earliest date to include (YYYY-MM-DD)
    pub start: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    pub end: Option<String>,
}

impl ListLecturesQuery {
    fn into_query(self) -> Result<LectureQuery, ApiError> {
        let mut field_errors = Vec::new();
        let from = parse_bound("start", self.start, &mut field_errors);
        let to = parse_bound("end", self.end, &mut field_errors);

        if field_errors.is_empty() {
            Ok(LectureQuery { from, to })
        } else {
            Err(ApiError::Validation {
                missing_fields: Vec::new(),
                field_errors,
            })
        }
    }
}

fn parse_bound(
    field: &str,
    value: Option<String>,
    field_errors: &mut Vec<FieldError>,
) -> Option<LectureDate> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    LectureDate::parse(&value)
        .map_err(|_| {
            field_errors.push(FieldError {
                field: field.to_string(),
                code: "invalid_date".to_string(),
                message: "Invalid date format. Use YYYY-MM-DD".to_string(),
            });
        })
        .ok()
}

fn lecture_id(raw: &str) -> Result<LectureId, ApiError> {
    LectureId::parse(raw).ok_or_else(|| ApiError::NotFound(format!("Lecture {raw}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List lectures, optionally within an inclusive date range
///
/// GET /lectures
#[utoipa::path(
    get,
    path = "/lectures",
    tag = "lectures",
    params(ListLecturesQuery),
    responses(
        (status = 200, description = "Lectures ordered by date and start time", body = Vec<LectureResponse>),
        (status = 400, description = "Malformed date bound", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_lectures(
    State(state): State<AppState>,
    Query(query): Query<ListLecturesQuery>,
) -> Result<Json<Vec<LectureResponse>>, ApiError> {
    let query = query.into_query()?;
    let lectures = state.lecture_service.list(query).await?;

    let response: Vec<LectureResponse> = lectures.into_iter().map(Into::into).collect();
    debug!(count = response.len(), "Listed lectures");
    Ok(Json(response))
}

/// Get a lecture by ID
///
/// GET /lectures/{id}
#[utoipa::path(
    get,
    path = "/lectures/{id}",
    tag = "lectures",
    params(
        ("id" = String, Path, description = "Lecture ID")
    ),
    responses(
        (status = 200, description = "Lecture details", body = LectureResponse),
        (status = 404, description = "Lecture not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_lecture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LectureResponse>, ApiError> {
    let id = lecture_id(&id)?;
    let lecture = state.lecture_service.get(&id).await?;
    Ok(Json(lecture.into()))
}

/// Create a new lecture
///
/// POST /lectures
#[utoipa::path(
    post,
    path = "/lectures",
    tag = "lectures",
    request_body = CreateLectureRequest,
    responses(
        (status = 201, description = "Lecture created", body = LectureResponse),
        (status = 400, description = "Missing or malformed fields", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_lecture(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateLectureRequest>,
) -> Result<(StatusCode, Json<LectureResponse>), ApiError> {
    let lecture = state.lecture_service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(lecture.into())))
}

/// Update an existing lecture
///
/// PUT /lectures/{id}
#[utoipa::path(
    put,
    path = "/lectures/{id}",
    tag = "lectures",
    params(
        ("id" = String, Path, description = "Lecture ID")
    ),
    request_body = UpdateLectureRequest,
    responses(
        (status = 200, description = "Lecture updated", body = LectureResponse),
        (status = 400, description = "Malformed fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Lecture not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_lecture(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateLectureRequest>,
) -> Result<Json<LectureResponse>, ApiError> {
    let id = lecture_id(&id)?;
    let lecture = state.lecture_service.update(&id, body.into()).await?;
    Ok(Json(lecture.into()))
}

/// Delete a lecture
///
/// DELETE /lectures/{id}
#[utoipa::path(
    delete,
    path = "/lectures/{id}",
    tag = "lectures",
    params(
        ("id" = String, Path, description = "Lecture ID")
    ),
    responses(
        (status = 204, description = "Lecture deleted"),
        (status = 404, description = "Lecture not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_lecture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = lecture_id(&id)?;
    state.lecture_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
