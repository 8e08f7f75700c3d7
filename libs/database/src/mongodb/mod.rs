//! MongoDB connection management and probes.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_AUTH_SOURCE, DEFAULT_DATABASE, DEFAULT_URL, MongoConfig};
pub use connector::{
    MongoError, client_options, connect_from_config, connect_from_config_with_retry,
};
pub use health::ping;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
