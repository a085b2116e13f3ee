use anyhow::Context as _;
use serde::{Deserialize, Serialize};

mod log_level;
pub use log_level::LogLevel;

static DEFAULT_CONFIG: &str = include_str!("../../default.toml");

/// Environment variable that overrides the configured api key
pub const API_KEY_ENV: &str = "PEXELS_API_KEY";

/// Configuration for a [`Client`](crate::Client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The key from <https://www.pexels.com/api/>
    pub api_key: String,
    /// The log level to use for the console output
    pub log_level: LogLevel,
    /// Root of the api. Only needs changing for testing
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            log_level: LogLevel::default(),
            base_url: crate::DEFAULT_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load the config from a toml file, then apply the environment
    pub async fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        let mut this = Self::parse(&data)?;
        this.apply_env();
        Ok(this)
    }

    /// Parse a toml config
    pub fn parse(data: &str) -> anyhow::Result<Self> {
        toml::from_str(data).with_context(|| "invalid config toml")
    }

    /// A config from just the environment
    pub fn from_env() -> Self {
        let mut this = Self::default();
        this.apply_env();
        this
    }

    fn apply_env(&mut self) {
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|s| !s.is_empty()) {
            log::trace!("using the api key from {} (len: {})", API_KEY_ENV, key.len());
            self.api_key = key;
        }
    }

    /// The bundled default configuration
    pub fn default_config() -> &'static str {
        DEFAULT_CONFIG
    }
}
