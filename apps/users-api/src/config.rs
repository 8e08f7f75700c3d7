use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;
use domain_users::mongodb::DEFAULT_COLLECTION;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `USERS_COLLECTION`, default `users`
    pub users_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let users_collection = env_or_default("USERS_COLLECTION", DEFAULT_COLLECTION);

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            users_collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 10] = [
        "APP_ENV",
        "PORT",
        "MONGODB_URI",
        "MONGODB_URL",
        "MONGO_URL",
        "DATABASE_NAME",
        "MONGODB_DATABASE",
        "MONGODB_USER",
        "MONGODB_PASSWORD",
        "USERS_COLLECTION",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(unset_all(), || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.server.port, 8080);
            assert_eq!(config.mongodb.url(), "mongodb://localhost:27017");
            assert_eq!(config.mongodb.database(), "user_management");
            assert_eq!(config.users_collection, "users");
            assert!(config.environment.is_development());
            assert_eq!(config.app.name, "users_api");
            assert_eq!(config.app.display_name(), "User management service");
        });
    }

    #[test]
    fn test_overrides() {
        let mut vars = unset_all();
        vars.extend([
            ("PORT", Some("3000")),
            ("MONGODB_URI", Some("mongodb://db:27017")),
            ("DATABASE_NAME", Some("accounts")),
            ("USERS_COLLECTION", Some("people")),
            ("APP_ENV", Some("production")),
        ]);

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.server.port, 3000);
            assert_eq!(config.mongodb.url(), "mongodb://db:27017");
            assert_eq!(config.mongodb.database(), "accounts");
            assert_eq!(config.users_collection, "people");
            assert!(config.environment.is_production());
        });
    }

    #[test]
    fn test_unparsable_port_fails() {
        let mut vars = unset_all();
        vars.push(("PORT", Some("eighty")));

        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
