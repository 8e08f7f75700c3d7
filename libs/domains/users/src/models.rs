use chrono::Utc;
use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::UserResult;
use crate::password;

/// User entity as persisted in the `users` collection.
///
/// Serialization targets BSON; use [`UserResponse`] for anything leaving
/// the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the store on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Caller-chosen natural key (unique)
    pub user_id: String,
    /// Unique, non-empty; format is not checked
    pub email: String,
    /// Argon2 PHC string
    #[serde(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// A not-yet-persisted user with both timestamps set to now and no password.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id: user_id.into(),
            email: email.into(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Hash `plaintext` and store the result on this user.
    pub fn hash_password(&mut self, plaintext: &str) -> UserResult<()> {
        self.password_hash = password::hash_password(plaintext)?;
        Ok(())
    }

    /// True when `candidate` matches the stored hash.
    ///
    /// A wrong password or a malformed stored hash yields `false`, never an error.
    pub fn check_password(&self, candidate: &str) -> bool {
        password::verify_password(candidate, &self.password_hash)
    }

    /// Hex form of the store identifier, empty before insert.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Next `updated_at` for a record last touched at `previous`.
///
/// Millisecond clock resolution could repeat `previous`, so the result is
/// at least one millisecond later.
pub fn next_updated_at(previous: DateTime) -> DateTime {
    let now = DateTime::now().timestamp_millis();
    DateTime::from_millis(now.max(previous.timestamp_millis() + 1))
}

/// Outbound representation of a user. Has no password field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// 24-character hex object id
    #[schema(example = "65f1c0ffee0123456789abcd")]
    pub id: String,
    #[schema(example = "alice")]
    pub user_id: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

fn to_chrono(value: DateTime) -> chrono::DateTime<Utc> {
    chrono::DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_hex(),
            user_id: user.user_id,
            email: user.email,
            created_at: to_chrono(user.created_at),
            updated_at: to_chrono(user.updated_at),
        }
    }
}

/// Body of `POST /users`.
///
/// Missing fields deserialize as empty strings so that they fail validation
/// rather than JSON parsing.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "user_id is required"))]
    #[schema(example = "alice")]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `PUT /users/{id}`.
///
/// An absent field is left untouched; a present field must be non-empty
/// (fields cannot be cleared).
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: Option<String>,
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn has_changes(&self) -> bool {
        self.user_id.is_some() || self.email.is_some() || self.password.is_some()
    }
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Field assignments applied by a single update write.
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub updated_at: DateTime,
}

impl UserChanges {
    /// Apply to an in-memory copy, mirroring what the store does with `$set`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref user_id) = self.user_id {
            user.user_id = user_id.clone();
        }
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref hash) = self.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = self.updated_at;
    }
}

/// Body of `GET /users`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Self {
            count: users.len(),
            users,
        }
    }
}

/// Confirmation body, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

/// Query for `GET /users/search`; `user_id` wins when both are given.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Natural key to look up
    pub user_id: Option<String>,
    /// Email to look up when `user_id` is absent
    pub email: Option<String>,
}

/// Query for `GET /users/search/email`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: Option<String>,
}
