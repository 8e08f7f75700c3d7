use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Error)]
pub enum UserError {
    /// Missing or empty input; never reaches the store
    #[error("{0}")]
    Validation(String),

    #[error("Invalid user ID format: {0}")]
    InvalidId(String),

    /// Lookup key with no matching record
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("user with this user_id already exists")]
    DuplicateUserId(String),

    #[error("user with this email already exists")]
    DuplicateEmail(String),

    /// Unique index violation the pre-checks did not catch
    #[error("Duplicate key: {0}")]
    Conflict(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::InvalidId(_) => AppError::InvalidId("Invalid user ID format".to_string()),
            UserError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            err @ (UserError::DuplicateUserId(_) | UserError::DuplicateEmail(_)) => {
                AppError::Conflict(err.to_string())
            }
            UserError::Conflict(msg) => AppError::Conflict(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        match duplicate_key_message(&err) {
            Some(message) => UserError::Conflict(message),
            None => UserError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::oid::Error> for UserError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        UserError::InvalidId(err.to_string())
    }
}

/// Server message of a duplicate-key failure, if `err` is one.
pub fn duplicate_key_message(err: &mongodb::error::Error) -> Option<String> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            Some(write_error.message.clone())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(command_error.message.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: UserError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(UserError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(UserError::InvalidId("zz".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(UserError::NotFound("id".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(UserError::DuplicateUserId("alice".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(UserError::DuplicateEmail("a@x.com".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(UserError::Conflict("E11000".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_of(UserError::PasswordHash("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(UserError::Database("timeout".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_messages_name_the_field() {
        assert_eq!(
            UserError::DuplicateUserId("alice".into()).to_string(),
            "user with this user_id already exists"
        );
        assert_eq!(
            UserError::DuplicateEmail("a@x.com".into()).to_string(),
            "user with this email already exists"
        );
    }

    #[test]
    fn test_object_id_parse_error_is_invalid_id() {
        let err = mongodb::bson::oid::ObjectId::parse_str("not-hex").unwrap_err();
        assert!(matches!(UserError::from(err), UserError::InvalidId(_)));
    }
}
