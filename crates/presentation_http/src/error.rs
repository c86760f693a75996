//! API error handling
//!
//! Maps application failures onto HTTP status codes and a stable JSON body.
//! In production mode, internal errors return generic messages without details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, REQUIRED, missing_fields};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// Set to `false` in production so storage messages (paths, SQL) stay in
/// the logs.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A JSON value of the wrong type at a known field
    #[error("Bad request: {message}")]
    InvalidField {
        message: String,
        field_error: FieldError,
    },

    #[error("Validation failed")]
    Validation {
        missing_fields: Vec<String>,
        field_errors: Vec<FieldError>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single malformed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// camelCase field name
    pub field: String,
    /// Machine-readable reason, e.g. `invalid_time`
    pub code: String,
    /// Human-readable reason
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "error": "Missing required fields",
    "code": "validation_error",
    "missingFields": ["title", "date"],
    "fieldErrors": []
}))]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Required fields that were absent or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    /// Fields that were present but malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn simple(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            missing_fields: None,
            field_errors: None,
            details: None,
        }
    }
}

impl ApiError {
    /// Split validator output into missing and malformed fields
    #[must_use]
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, list)| {
                list.iter()
                    .filter(|e| e.code != REQUIRED)
                    .map(|e| FieldError {
                        field: field.to_string(),
                        code: e.code.to_string(),
                        message: e
                            .message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        Self::Validation {
            missing_fields: missing_fields(errors),
            field_errors,
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidField { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self, expose_details: bool) -> ErrorResponse {
        match self {
            Self::BadRequest(msg) => ErrorResponse::simple(msg, "bad_request"),
            Self::InvalidField {
                message,
                field_error,
            } => ErrorResponse {
                field_errors: Some(vec![field_error]),
                ..ErrorResponse::simple(message, "bad_request")
            },
            Self::Validation {
                missing_fields,
                field_errors,
            } => {
                let error = if field_errors.is_empty() && !missing_fields.is_empty() {
                    "Missing required fields"
                } else {
                    "Validation failed"
                };
                ErrorResponse {
                    missing_fields: Some(missing_fields),
                    field_errors: Some(field_errors),
                    ..ErrorResponse::simple(error, "validation_error")
                }
            },
            Self::NotFound(msg) => ErrorResponse::simple(msg, "not_found"),
            Self::ServiceUnavailable(msg) => {
                let message = if expose_details {
                    msg
                } else {
                    "Service temporarily unavailable".to_string()
                };
                ErrorResponse::simple(message, "service_unavailable")
            },
            Self::Internal(msg) => ErrorResponse {
                details: expose_details.then_some(msg),
                ..ErrorResponse::simple("An internal error occurred", "internal_error")
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(msg) = &self {
            error!(error = %msg, "Request failed with internal error");
        }

        let status = self.status();
        let body = self.body(should_expose_details());

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Validation(errors) => Self::from_validation(&errors),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;
    use validator::ValidationError;

    use super::*;

    fn error_with(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("invalid input".to_string()).to_string(),
            "Bad request: invalid input"
        );
        assert_eq!(
            ApiError::NotFound("Lecture 1".to_string()).to_string(),
            "Not found: Lecture 1"
        );
        assert_eq!(
            ApiError::Internal("unexpected".to_string()).to_string(),
            "Internal error: unexpected"
        );
    }

    #[test]
    fn statuses_match_variants() {
        assert_eq!(
            ApiError::BadRequest(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation {
                missing_fields: vec![],
                field_errors: vec![]
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound(String::new()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::ServiceUnavailable(String::new()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_omits_empty_parts() {
        let json = serde_json::to_value(ErrorResponse::simple("Bad request", "bad_request")).unwrap();
        assert_eq!(json["error"], "Bad request");
        assert_eq!(json["code"], "bad_request");
        assert!(json.get("details").is_none());
        assert!(json.get("missingFields").is_none());
        assert!(json.get("fieldErrors").is_none());
    }

    #[test]
    fn invalid_field_is_bad_request_with_field_error() {
        let err = ApiError::InvalidField {
            message: "wrong type".to_string(),
            field_error: FieldError {
                field: "maxStudents".to_string(),
                code: "invalid_type".to_string(),
                message: "invalid value: integer `-5`, expected u32".to_string(),
            },
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(err.body(false)).unwrap();
        assert_eq!(json["code"], "bad_request");
        assert_eq!(json["fieldErrors"][0]["field"], "maxStudents");
        assert_eq!(json["fieldErrors"][0]["code"], "invalid_type");
        assert!(json.get("missingFields").is_none());
    }

    #[test]
    fn validation_errors_are_split() {
        let mut errors = ValidationErrors::new();
        errors.add("title", error_with(REQUIRED, "title is required"));
        errors.add(
            "startTime",
            error_with("invalid_time", "Invalid time format. Use HH:MM"),
        );

        let ApiError::Validation {
            missing_fields,
            field_errors,
        } = ApiError::from_validation(&errors)
        else {
            unreachable!("Expected Validation");
        };
        assert_eq!(missing_fields, vec!["title"]);
        assert_eq!(
            field_errors,
            vec![FieldError {
                field: "startTime".to_string(),
                code: "invalid_time".to_string(),
                message: "Invalid time format. Use HH:MM".to_string(),
            }]
        );
    }

    #[test]
    fn only_missing_fields_reads_as_missing() {
        let body = ApiError::Validation {
            missing_fields: vec!["title".to_string()],
            field_errors: vec![],
        }
        .body(true);
        assert_eq!(body.error, "Missing required fields");
        assert_eq!(body.code, "validation_error");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["missingFields"][0], "title");
        assert_eq!(json["fieldErrors"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn malformed_fields_read_as_failed() {
        let body = ApiError::Validation {
            missing_fields: vec![],
            field_errors: vec![FieldError {
                field: "date".to_string(),
                code: "invalid_date".to_string(),
                message: "Invalid date format. Use YYYY-MM-DD".to_string(),
            }],
        }
        .body(true);
        assert_eq!(body.error, "Validation failed");
    }

    #[test]
    fn internal_details_follow_exposure() {
        let exposed = ApiError::Internal("disk I/O error".to_string()).body(true);
        assert_eq!(exposed.error, "An internal error occurred");
        assert_eq!(exposed.details.as_deref(), Some("disk I/O error"));

        let hidden = ApiError::Internal("disk I/O error".to_string()).body(false);
        assert!(hidden.details.is_none());
    }

    #[test]
    fn service_unavailable_is_generic_when_hidden() {
        let hidden = ApiError::ServiceUnavailable("pool timed out".to_string()).body(false);
        assert_eq!(hidden.error, "Service temporarily unavailable");
        assert_eq!(hidden.code, "service_unavailable");
    }

    #[test]
    fn application_not_found_converts() {
        let result: ApiError = ApplicationError::NotFound("Lecture 42".to_string()).into();
        assert!(matches!(result, ApiError::NotFound(ref m) if m == "Lecture 42"));
    }

    #[test]
    fn domain_errors_convert_to_bad_request() {
        let source = ApplicationError::Domain(DomainError::InvalidTime("25:00".to_string()));
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn application_internal_converts() {
        let result: ApiError = ApplicationError::Internal("crash".to_string()).into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn into_response_uses_status() {
        let response = ApiError::NotFound("resource".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal("crash".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
