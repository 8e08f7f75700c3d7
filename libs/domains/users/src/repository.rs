use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserChanges};

/// Storage capability behind [`UserService`](crate::service::UserService).
///
/// Lookups return `Ok(None)` for a missing record; turning absence into an
/// error is the caller's decision. Implementations reject writes that would
/// duplicate `user_id` or `email`, the same way a unique index does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned `id`
    async fn insert(&self, user: User) -> UserResult<User>;

    async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// Exact match on the natural key
    async fn find_by_user_id(&self, user_id: &str) -> UserResult<Option<User>>;

    /// Exact match on email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Apply `changes` in a single write. Returns `false` when no record has `id`.
    async fn update(&self, id: ObjectId, changes: UserChanges) -> UserResult<bool>;

    /// Returns `false` when no record has `id`
    async fn delete(&self, id: ObjectId) -> UserResult<bool>;

    /// Every stored user, in insertion order
    async fn list(&self) -> UserResult<Vec<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error a unique index would raise if `user_id` or `email` were taken by
    /// a record other than `exclude`.
    fn collision(
        users: &[User],
        user_id: Option<&str>,
        email: Option<&str>,
        exclude: Option<ObjectId>,
    ) -> Option<UserError> {
        let others = || users.iter().filter(move |u| exclude.is_none() || u.id != exclude);

        if let Some(user_id) = user_id {
            if others().any(|u| u.user_id == user_id) {
                return Some(UserError::DuplicateUserId(user_id.to_string()));
            }
        }
        if let Some(email) = email {
            if others().any(|u| u.email == email) {
                return Some(UserError::DuplicateEmail(email.to_string()));
            }
        }
        None
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if let Some(err) =
            Self::collision(&users, Some(&user.user_id), Some(&user.email), None)
        {
            return Err(err);
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if let Some(err) = Self::collision(
            &users,
            changes.user_id.as_deref(),
            changes.email.as_deref(),
            Some(id),
        ) {
            return Err(err);
        }

        match users.iter_mut().find(|u| u.id == Some(id)) {
            Some(user) => {
                changes.apply_to(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> UserResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != Some(id));
        Ok(users.len() < before)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}
