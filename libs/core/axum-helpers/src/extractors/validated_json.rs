//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that deserializes with `serde_json` and then runs
/// [`Validate`].
///
/// Unlike `axum::Json` it does not inspect `Content-Type`; that check lives
/// in [`crate::http::require_json_content_type`] so a missing header is
/// still accepted. Rejections are [`AppError`]s:
/// - unreadable or malformed body: `InvalidJson` (400 "Invalid request body")
/// - empty body: read as `{}`, so it fails only on required fields
/// - failed validation: `ValidationError` (400 with per-field details)
///
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 1))]
///     user_id: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     payload.user_id
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        // An empty body carries no fields
        let body: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes[..] };
        let data: T = serde_json::from_slice(body)?;
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, response::IntoResponse, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[serde(default)]
        #[validate(length(min = 1))]
        name: String,
    }

    async fn echo(ValidatedJson(payload): ValidatedJson<Payload>) -> impl IntoResponse {
        payload.name
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(body: &'static str) -> (StatusCode, String) {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_without_content_type() {
        let (status, body) = send(r#"{"name":"alice"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice");
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_request_body() {
        let (status, body) = send("{\"name\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid request body"));
    }

    #[tokio::test]
    async fn test_empty_body_is_read_as_empty_object() {
        let (status, body) = send("").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
        assert!(!body.contains("INVALID_JSON"));
    }

    #[tokio::test]
    async fn test_missing_field_fails_validation() {
        let (status, body) = send("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
        assert!(body.contains("name"));
    }
}
