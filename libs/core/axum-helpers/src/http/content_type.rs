use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{AppError, ErrorCode};

/// Rejects POST/PUT/PATCH requests whose `Content-Type` is present but not
/// `application/json` (parameters such as `charset` are ignored).
///
/// A request without the header passes through; the body is still parsed as JSON.
pub async fn require_json_content_type(request: Request, next: Next) -> Response {
    let carries_body = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH
    );

    if carries_body {
        if let Some(value) = request.headers().get(header::CONTENT_TYPE) {
            let is_json = value.to_str().map(is_json_media_type).unwrap_or(false);
            if !is_json {
                return AppError::UnsupportedContentType(
                    ErrorCode::UnsupportedContentType
                        .default_message()
                        .to_string(),
                )
                .into_response();
            }
        }
    }

    next.run(request).await
}

fn is_json_media_type(value: &str) -> bool {
    let media_type = value.split(';').next().unwrap_or_default().trim();
    media_type.eq_ignore_ascii_case("application/json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::post};
    use tower::ServiceExt;

    #[test]
    fn test_is_json_media_type() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("Application/JSON"));
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("application/jsonp"));
        assert!(!is_json_media_type(""));
    }

    async fn status_for(method: &str, content_type: Option<&str>) -> StatusCode {
        let app = Router::new()
            .route("/", post(|| async { "ok" }).put(|| async { "ok" }).get(|| async { "ok" }))
            .layer(middleware::from_fn(require_json_content_type));

        let mut builder = axum::http::Request::builder().method(method).uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }

        app.oneshot(builder.body(Body::from("{}")).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_non_json_post_rejected() {
        assert_eq!(
            status_for("POST", Some("text/plain")).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for("PUT", Some("application/x-www-form-urlencoded")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_json_or_missing_header_accepted() {
        assert_eq!(
            status_for("POST", Some("application/json; charset=utf-8")).await,
            StatusCode::OK
        );
        assert_eq!(status_for("PUT", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_is_not_checked() {
        assert_eq!(status_for("GET", Some("text/plain")).await, StatusCode::OK);
    }
}
