//! Central module for application-wide configuration settings.
//!
//! Settings come from `TRIVIA_*` environment variables (after loading an optional
//! `.env` file). Every field has a default, so an empty environment still boots a
//! working server.

use serde::Deserialize;

/// `database_url` value selecting the in-process store.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// SQLite file path, or `memory`.
    pub database_url: String,
    /// Insert the default categories when the store has none.
    pub seed: bool,
    /// Fixed seed for quiz selection; random when unset.
    pub random_seed: Option<u64>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "trivia.db".to_string(),
            seed: true,
            random_seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("TRIVIA").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.eq_ignore_ascii_case(MEMORY_DATABASE)
    }
}
