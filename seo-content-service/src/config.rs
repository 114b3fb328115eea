use thiserror::Error;

use crate::generator::DEFAULT_GENERATION_MODEL;
use crate::search::GOOGLE_SEARCH_BASE_URL;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("PORT must be a valid port number, got `{0}`")]
    InvalidPort(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search_api_key: String,
    pub search_engine_id: String,
    pub search_base_url: String,
    pub generation_api_key: String,
    pub generation_model: String,
    pub port: u16,
    pub static_dir: String,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            search_api_key: require("GOOGLE_SEARCH_API_KEY")?,
            search_engine_id: require("GOOGLE_CSE_ID")?,
            search_base_url: get("GOOGLE_SEARCH_BASE_URL")
                .unwrap_or_else(|| GOOGLE_SEARCH_BASE_URL.to_string()),
            generation_api_key: require("OPENROUTER_API_KEY")?,
            generation_model: get("GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            port,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.chars().take(5).map(char::len_utf8).sum::<usize>();
            format!("{}...({} chars)", &val[..n], val.chars().count())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  GOOGLE_SEARCH_API_KEY: {}", preview(&self.search_api_key));
        tracing::info!("  GOOGLE_CSE_ID: {}", preview(&self.search_engine_id));
        tracing::info!("  GOOGLE_SEARCH_BASE_URL: {}", self.search_base_url);
        tracing::info!("  OPENROUTER_API_KEY: {}", preview(&self.generation_api_key));
        tracing::info!("  GENERATION_MODEL: {}", self.generation_model);
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  STATIC_DIR: {}", self.static_dir);
    }
}
