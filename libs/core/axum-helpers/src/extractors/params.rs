//! Query and path extractors whose rejections use the JSON error body.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// [`Query`] that rejects with `AppError::BadRequest` instead of plain text.
///
/// ```ignore
/// async fn search(ApiQuery(query): ApiQuery<SearchQuery>) -> String {
///     query.user_id.unwrap_or_default()
/// }
/// ```
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

/// [`Path`] that rejects with `AppError::BadRequest` instead of plain text.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Search {
        user_id: Option<String>,
    }

    async fn search(ApiQuery(query): ApiQuery<Search>) -> String {
        query.user_id.unwrap_or_default()
    }

    async fn by_number(ApiPath(n): ApiPath<u32>) -> String {
        n.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/search", get(search))
            .route("/items/{n}", get(by_number))
    }

    async fn get_uri(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_query_and_path_pass_through() {
        assert_eq!(get_uri("/search?user_id=alice").await, (StatusCode::OK, "alice".into()));
        assert_eq!(get_uri("/items/7").await, (StatusCode::OK, "7".into()));
    }

    #[tokio::test]
    async fn test_repeated_query_field_is_json_bad_request() {
        let (status, body) = get_uri("/search?user_id=a&user_id=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["kind"], "BAD_REQUEST");
        assert!(body["error"].as_str().unwrap().contains("user_id"));
    }

    #[tokio::test]
    async fn test_unparsable_path_is_json_bad_request() {
        let (status, body) = get_uri("/items/seven").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["kind"], "BAD_REQUEST");
    }
}
