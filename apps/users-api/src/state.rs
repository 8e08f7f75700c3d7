//! Application state management.
//!
//! The shared state handed to route builders at startup.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: `Client` and `Database` share the underlying connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, held for the process lifetime
    pub mongo_client: Client,
    /// Database named by `DATABASE_NAME`
    pub db: Database,
}

impl AppState {
    pub fn new(config: crate::config::Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config,
            mongo_client,
            db,
        }
    }
}
