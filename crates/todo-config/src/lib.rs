//! # todo-config
//!
//! Layered configuration loading for the Todo List API using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TODO_*` prefix, `__` as separator)
//! 2. Project-level `./todo.toml`
//! 3. User-level `<config_dir>/todo-api/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TODO_SERVER__PORT` -> `server.port`, `TODO_GENERAL__MODE` ->
//! `general.mode`, etc. The `__` (double underscore) separates nested sections.
//!
//! # Usage
//!
//! ```no_run
//! use todo_config::TodoConfig;
//!
//! let config = TodoConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod database;
mod error;
mod general;
mod server;

pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::{GeneralConfig, Mode};
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the project-level config, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "todo.toml";

/// Prefix of the environment variables read into the config.
pub const ENV_PREFIX: &str = "TODO_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TodoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl TodoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can layer extra providers (CLI flags) on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values no component can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(invalid("database.path", "must not be empty"));
        }
        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host", "must not be empty"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be a non-zero port"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("todo-api").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = TodoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.mode, Mode::Dev);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.path, "todo.db");
    }

    #[test]
    fn defaults_survive_serialized_provider() {
        let config: TodoConfig = Figment::from(Serialized::defaults(TodoConfig::default()))
            .extract()
            .expect("should extract defaults");
        assert_eq!(config, TodoConfig::default());
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = TodoConfig::default();
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = TodoConfig::default();
        config.database.path = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "database.path"
        ));
    }
}
