//! JSON body extraction
//!
//! Provides a `JsonBody` extractor that reports malformed bodies with the
//! API's own error format instead of axum's plain-text rejections.

use std::error::Error as StdError;

use axum::{
    Json,
    extract::{
        FromRequest, Request,
        rejection::{JsonDataError, JsonRejection},
    },
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldError};

/// A JSON extractor whose rejection is a 400 `bad_request`
///
/// A value of the wrong type also names its field in `fieldErrors`, e.g.
/// `maxStudents` or `materials[0].url`. Required-field checks happen later
/// in the service, so a body with absent fields still extracts.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let field_error = match &rejection {
        JsonRejection::JsonDataError(e) => mistyped_field(e),
        _ => None,
    };

    match field_error {
        Some(field_error) => ApiError::InvalidField {
            message: rejection.body_text(),
            field_error,
        },
        None => ApiError::BadRequest(rejection.body_text()),
    }
}

/// The field a data error points at, if it is inside the top-level object
fn mistyped_field(rejection: &JsonDataError) -> Option<FieldError> {
    let err = rejection
        .source()
        .and_then(StdError::source)
        .and_then(|e| e.downcast_ref::<serde_path_to_error::Error<serde_json::Error>>())?;

    let field = err.path().to_string();
    if field == "." {
        return None;
    }

    Some(FieldError {
        field,
        code: "invalid_type".to_string(),
        message: err.inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct TestRequest {
        title: Option<String>,
        #[serde(default)]
        seats: Option<u32>,
    }

    async fn test_handler(JsonBody(req): JsonBody<TestRequest>) -> String {
        format!("{}:{}", req.title.unwrap_or_default(), req.seats.unwrap_or(0))
    }

    fn create_test_app() -> Router {
        Router::new().route("/test", post(test_handler))
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> axum::response::Response {
        let mut builder = axum::http::Request::builder().method("POST").uri("/test");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        create_test_app()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(body: &'static str, content_type: Option<&str>) -> StatusCode {
        send(body, content_type).await.status()
    }

    async fn error_body(body: &'static str) -> serde_json::Value {
        let response = send(body, Some("application/json")).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let status = post_json(r#"{"title": "Hooks", "seats": 4}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn absent_fields_still_extract() {
        let status = post_json("{}", Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let status = post_json(r#"{"title": not valid json}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_value_type_rejected() {
        let status = post_json(r#"{"seats": "many"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_value_type_names_the_field() {
        let body = error_body(r#"{"title": "Hooks", "seats": -5}"#).await;
        assert_eq!(body["code"], "bad_request");
        assert_eq!(body["fieldErrors"][0]["field"], "seats");
        assert_eq!(body["fieldErrors"][0]["code"], "invalid_type");
    }

    #[tokio::test]
    async fn syntax_error_has_no_field_errors() {
        let body = error_body(r#"{"title": "#).await;
        assert_eq!(body["code"], "bad_request");
        assert!(body.get("fieldErrors").is_none());
    }

    #[tokio::test]
    async fn missing_content_type_rejected() {
        let status = post_json(r#"{"title": "Hooks"}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
