pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static application metadata, reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// `description` from the package manifest; may be empty
    pub description: &'static str,
}

impl AppInfo {
    /// Human-readable service name, preferring the package description.
    pub fn display_name(&self) -> &'static str {
        if self.description.is_empty() {
            self.name
        } else {
            self.description
        }
    }
}

/// Builds an [`AppInfo`] from the calling crate's package metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Returns the value of the first variable in `keys` that is set and non-empty.
///
/// Used for settings that accept legacy aliases, e.g. `MONGODB_URI` / `MONGO_URL`.
pub fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
}

/// Parses an optional environment variable, falling back to `default` when unset.
pub fn env_parse_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_uses_package_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
        assert_eq!(info.display_name(), "Shared configuration and tracing setup");
    }

    #[test]
    fn test_app_info_display_name_falls_back_to_name() {
        let info = AppInfo {
            name: "users_api",
            version: "0.1.0",
            description: "",
        };
        assert_eq!(info.display_name(), "users_api");
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_first_prefers_earlier_keys() {
        temp_env::with_vars(
            [("PRIMARY_KEY", Some("primary")), ("ALIAS_KEY", Some("alias"))],
            || {
                assert_eq!(
                    env_first(&["PRIMARY_KEY", "ALIAS_KEY"]),
                    Some("primary".to_string())
                );
            },
        );
    }

    #[test]
    fn test_env_first_skips_unset_and_empty() {
        temp_env::with_vars(
            [
                ("PRIMARY_KEY", Some("")),
                ("SECOND_KEY", None),
                ("ALIAS_KEY", Some("alias")),
            ],
            || {
                assert_eq!(
                    env_first(&["PRIMARY_KEY", "SECOND_KEY", "ALIAS_KEY"]),
                    Some("alias".to_string())
                );
                assert_eq!(env_first(&["PRIMARY_KEY", "SECOND_KEY"]), None);
            },
        );
    }

    #[test]
    fn test_env_parse_or_default() {
        temp_env::with_var_unset("POOL_SIZE", || {
            assert_eq!(env_parse_or_default("POOL_SIZE", 5u32).unwrap(), 5);
        });
        temp_env::with_var("POOL_SIZE", Some("42"), || {
            assert_eq!(env_parse_or_default("POOL_SIZE", 5u32).unwrap(), 42);
        });
        temp_env::with_var("POOL_SIZE", Some("many"), || {
            let err = env_parse_or_default("POOL_SIZE", 5u32).unwrap_err();
            assert!(err.to_string().contains("POOL_SIZE"));
        });
    }
}
