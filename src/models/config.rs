//! Runtime configuration shared by the admin and API binaries.

use actix_web::cookie::Key;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::db::StoreConfig;

/// Name of the variable selecting the runtime environment.
pub const ENVIRONMENT_VARIABLE: &str = "BLOG_ENVIRONMENT";

/// Deployment flavour the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum RuntimeEnvironment {
    Development,
    Docker,
    /// Disposable in-memory store, used by test harnesses.
    Test,
    #[default]
    Production,
}

impl RuntimeEnvironment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Docker => "Docker",
            Self::Test => "Test",
            Self::Production => "Production",
        }
    }

    /// Whether the store lives in memory for the lifetime of the process.
    pub const fn uses_in_memory_store(self) -> bool {
        matches!(self, Self::Test)
    }

    /// Whether API docs and detailed error bodies are exposed.
    pub const fn exposes_diagnostics(self) -> bool {
        matches!(self, Self::Development | Self::Docker)
    }
}

impl From<&str> for RuntimeEnvironment {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" => Self::Development,
            "docker" => Self::Docker,
            "test" => Self::Test,
            _ => Self::Production,
        }
    }
}

impl From<String> for RuntimeEnvironment {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Configuration options for both blog servers.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub environment: RuntimeEnvironment,
    /// Path of the SQLite database file. Ignored for the in-memory store.
    pub database_url: String,
    pub bind_address: String,
    pub admin_port: u16,
    pub api_port: u16,
    /// Glob handed to Tera.
    pub templates_dir: String,
    pub assets_dir: String,
    /// Cookie signing key, at least 64 bytes.
    #[serde(default)]
    pub secret: Option<String>,
}

impl ServerConfig {
    /// Load configuration for the environment named by `BLOG_ENVIRONMENT`.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var(ENVIRONMENT_VARIABLE).unwrap_or_default();
        Self::load_for(RuntimeEnvironment::from(environment))
    }

    /// Layer defaults, `config/default.yaml`, `config/<environment>.yaml` and
    /// `BLOG_*` variables, later sources winning.
    pub fn load_for(environment: RuntimeEnvironment) -> Result<Self, ConfigError> {
        let environment_file = format!("config/{}", environment.as_str().to_ascii_lowercase());

        Config::builder()
            .set_default("environment", environment.as_str())?
            .set_default("database_url", "blog.db")?
            .set_default("bind_address", "127.0.0.1")?
            .set_default("admin_port", 8080_i64)?
            .set_default("api_port", 8081_i64)?
            .set_default("templates_dir", "templates/**/*")?
            .set_default("assets_dir", "assets")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&environment_file).required(false))
            .add_source(Environment::with_prefix("BLOG").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Key signing the session and flash cookies.
    ///
    /// Without a usable `secret` a random key is generated, so cookies do not
    /// survive a restart.
    pub fn cookie_key(&self) -> Key {
        match self.secret.as_deref().map(|secret| Key::try_from(secret.as_bytes())) {
            Some(Ok(key)) => key,
            Some(Err(e)) => {
                log::warn!("Configured secret cannot sign cookies ({e}), using a random key");
                Key::generate()
            }
            None => {
                log::warn!("No secret configured, using a random cookie key");
                Key::generate()
            }
        }
    }

    /// Store backing this process.
    pub fn store(&self) -> StoreConfig {
        if self.environment.uses_in_memory_store() {
            StoreConfig::InMemory
        } else {
            StoreConfig::Sqlite(self.database_url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment_names_case_insensitively() {
        assert_eq!(RuntimeEnvironment::from("Test"), RuntimeEnvironment::Test);
        assert_eq!(
            RuntimeEnvironment::from(" development "),
            RuntimeEnvironment::Development
        );
        assert_eq!(RuntimeEnvironment::from("DOCKER"), RuntimeEnvironment::Docker);
    }

    #[test]
    fn unknown_environment_is_production() {
        assert_eq!(RuntimeEnvironment::from("Staging"), RuntimeEnvironment::Production);
        assert_eq!(RuntimeEnvironment::from(""), RuntimeEnvironment::Production);
    }

    #[test]
    fn only_test_uses_in_memory_store() {
        assert!(RuntimeEnvironment::Test.uses_in_memory_store());
        assert!(!RuntimeEnvironment::Development.uses_in_memory_store());
        assert!(!RuntimeEnvironment::Production.uses_in_memory_store());
    }

    #[test]
    fn diagnostics_only_in_development_and_docker() {
        assert!(RuntimeEnvironment::Development.exposes_diagnostics());
        assert!(RuntimeEnvironment::Docker.exposes_diagnostics());
        assert!(!RuntimeEnvironment::Test.exposes_diagnostics());
        assert!(!RuntimeEnvironment::Production.exposes_diagnostics());
    }

    fn test_config() -> ServerConfig {
        ServerConfig {
            environment: RuntimeEnvironment::Test,
            database_url: "blog.db".into(),
            bind_address: "127.0.0.1".into(),
            admin_port: 8080,
            api_port: 8081,
            templates_dir: "templates/**/*".into(),
            assets_dir: "assets".into(),
            secret: None,
        }
    }

    #[test]
    fn store_follows_environment() {
        let mut config = test_config();
        assert_eq!(config.store(), StoreConfig::InMemory);

        config.environment = RuntimeEnvironment::Production;
        assert_eq!(config.store(), StoreConfig::Sqlite("blog.db".into()));
    }

    #[test]
    fn long_secret_signs_cookies_deterministically() {
        let mut config = test_config();
        config.secret = Some("s".repeat(64));

        assert_eq!(config.cookie_key().master(), config.cookie_key().master());
    }

    #[test]
    fn short_secret_falls_back_to_a_random_key() {
        let mut config = test_config();
        config.secret = Some("too short".into());

        assert_ne!(config.cookie_key().master(), config.cookie_key().master());
    }
}
