//! Users API routes
//!
//! Wires the users domain to the MongoDB collection named in the config.

use axum::Router;
use domain_users::{MongoUserRepository, UserResult, UserService, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoUserRepository {
    MongoUserRepository::with_collection(&state.db, &state.config.users_collection)
}

/// Create the unique indexes the users collection relies on
pub async fn init_indexes(state: &AppState) -> UserResult<()> {
    repository(state).init_indexes().await
}

/// Create users router
pub fn router(state: &AppState) -> Router {
    handlers::router(UserService::new(repository(state)))
}
