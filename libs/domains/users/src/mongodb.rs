//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserChanges};
use crate::repository::UserRepository;

pub const DEFAULT_COLLECTION: &str = "users";
pub const USER_ID_INDEX: &str = "idx_user_id_unique";
pub const EMAIL_INDEX: &str = "idx_email_unique";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Repository over the `users` collection of `db`.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(&client.database("user_management"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Create the unique indexes on `user_id` and `email`.
    ///
    /// Idempotent. They back the service's pre-insert checks when two
    /// writers race for the same key.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            unique_index("user_id", USER_ID_INDEX),
            unique_index("email", EMAIL_INDEX),
        ];
        self.collection.create_indexes(indexes).await?;

        tracing::info!(
            collection = self.collection.name(),
            "User indexes ensured"
        );
        Ok(())
    }

    /// `$set` document for a partial update; only present fields are written.
    fn build_update(changes: &UserChanges) -> Document {
        let mut set = doc! { "updated_at": changes.updated_at };

        if let Some(ref user_id) = changes.user_id {
            set.insert("user_id", user_id.as_str());
        }
        if let Some(ref email) = changes.email {
            set.insert("email", email.as_str());
        }
        if let Some(ref hash) = changes.password_hash {
            set.insert("password", hash.as_str());
        }

        doc! { "$set": set }
    }
}

fn unique_index(field: &str, name: &str) -> IndexModel {
    let mut keys = Document::new();
    keys.insert(field, 1);

    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(name.to_string())
                .build(),
        )
        .build()
}

/// Name the colliding field when the server reports which index was violated.
fn refine_conflict(err: UserError, user_id: Option<&str>, email: Option<&str>) -> UserError {
    let UserError::Conflict(message) = err else {
        return err;
    };

    match (user_id, email) {
        (Some(user_id), _) if message.contains(USER_ID_INDEX) => {
            UserError::DuplicateUserId(user_id.to_string())
        }
        (_, Some(email)) if message.contains(EMAIL_INDEX) => {
            UserError::DuplicateEmail(email.to_string())
        }
        _ => UserError::Conflict(message),
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.user_id))]
    async fn insert(&self, mut user: User) -> UserResult<User> {
        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| refine_conflict(e.into(), Some(&user.user_id), Some(&user.email)))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::Database(format!(
                "insert returned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;
        user.id = Some(id);

        tracing::info!(id = %id, "User inserted");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "user_id": user_id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ObjectId, changes: UserChanges) -> UserResult<bool> {
        let update = Self::build_update(&changes);

        let result = self
            .collection
            .update_one(doc! { "_id": id }, update)
            .await
            .map_err(|e| {
                refine_conflict(e.into(), changes.user_id.as_deref(), changes.email.as_deref())
            })?;

        if result.matched_count > 0 {
            tracing::info!(id = %id, "User updated");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(id = %id, "User deleted");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }
}
