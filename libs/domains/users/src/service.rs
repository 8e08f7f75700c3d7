use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserChanges, next_updated_at};
use crate::password;
use crate::repository::UserRepository;

/// Persistence gateway: uniqueness rules, hashing and id parsing over a
/// [`UserRepository`].
///
/// Identifiers arrive as hex strings and are parsed here, so a malformed id
/// fails before any storage call.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user after checking `user_id`, then `email`, for collisions.
    ///
    /// The checks and the insert are separate calls; a concurrent create can
    /// slip between them, in which case the storage unique index reports the
    /// conflict instead.
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<User> {
        require("user_id", &input.user_id)?;
        require("email", &input.email)?;
        require("password", &input.password)?;

        if self.repository.find_by_user_id(&input.user_id).await?.is_some() {
            return Err(UserError::DuplicateUserId(input.user_id));
        }
        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let mut user = User::new(input.user_id, input.email);
        user.hash_password(&input.password)?;

        let created = self.repository.insert(user).await?;
        tracing::info!(id = %created.id_hex(), "Created user");
        Ok(created)
    }

    /// Fails with `InvalidId` for a malformed id and `NotFound` when absent.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<User> {
        let oid = parse_id(id)?;
        self.repository
            .find_by_id(oid)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// `Ok(None)` when no user has this natural key
    #[instrument(skip(self))]
    pub async fn get_user_by_user_id(&self, user_id: &str) -> UserResult<Option<User>> {
        self.repository.find_by_user_id(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.find_by_email(email).await
    }

    /// Apply the present fields of `input` and return the stored result.
    ///
    /// `updated_at` always advances, even when `input` carries no fields.
    /// Setting `user_id` or `email` to the record's own current value is not
    /// a collision.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: &str, input: UpdateUserRequest) -> UserResult<User> {
        let oid = parse_id(id)?;
        if let Some(ref user_id) = input.user_id {
            require("user_id", user_id)?;
        }
        if let Some(ref email) = input.email {
            require("email", email)?;
        }
        if let Some(ref password) = input.password {
            require("password", password)?;
        }

        let current = self
            .repository
            .find_by_id(oid)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(ref user_id) = input.user_id {
            let owner = self.repository.find_by_user_id(user_id).await?;
            if owner.is_some_and(|u| u.id != Some(oid)) {
                return Err(UserError::DuplicateUserId(user_id.clone()));
            }
        }
        if let Some(ref email) = input.email {
            let owner = self.repository.find_by_email(email).await?;
            if owner.is_some_and(|u| u.id != Some(oid)) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let password_hash = match input.password {
            Some(ref plaintext) => Some(password::hash_password(plaintext)?),
            None => None,
        };

        let changes = UserChanges {
            user_id: input.user_id,
            email: input.email,
            password_hash,
            updated_at: next_updated_at(current.updated_at),
        };

        if !self.repository.update(oid, changes).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        let updated = self
            .repository
            .find_by_id(oid)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        tracing::info!(id = %id, "Updated user");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        let oid = parse_id(id)?;

        if !self.repository.delete(oid).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(id = %id, "Deleted user");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }
}

fn parse_id(id: &str) -> UserResult<ObjectId> {
    Ok(ObjectId::parse_str(id)?)
}

fn require(field: &str, value: &str) -> UserResult<()> {
    if value.is_empty() {
        return Err(UserError::Validation(format!("{field} is required")));
    }
    Ok(())
}
