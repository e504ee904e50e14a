//! Application configuration
//!
//! Loaded from an optional YAML or TOML file, then overridden by environment
//! variables.

use anyhow::{Context, Result};
use dexter_egress::HttpClientConfig;
use dexter_egress::client::DEFAULT_BASE_URL;
use dexter_fixtures::FixtureConfig;
use dexter_observability::{LogFormat, LoggingConfig};
use dexter_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "DEXTER_CONFIG";

/// Which backend serves data-access calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ClientMode {
    /// In-memory fixtures with simulated latency and failures
    #[default]
    Development,
    /// Real HTTP backend
    Production,
}

impl From<&str> for ClientMode {
    /// Only `development` selects fixtures; every other mode name is treated
    /// as a deployed build
    fn from(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("development") {
            ClientMode::Development
        } else {
            ClientMode::Production
        }
    }
}

impl From<String> for ClientMode {
    fn from(mode: String) -> Self {
        ClientMode::from(mode.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default per-call timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixturesConfig {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: ClientMode,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub fixtures: FixturesConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file (YAML or TOML)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// File named by `path`, else by `DEXTER_CONFIG`, else defaults; then
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env();
        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MODE") {
            self.mode = ClientMode::from(val);
        }

        if let Ok(val) = std::env::var("VITE_API_BASE_URL") {
            if !val.trim().is_empty() {
                self.api.base_url = val;
            }
        }

        if let Ok(val) = std::env::var("DEXTER_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(ms) => self.api.timeout_ms = ms,
                Err(_) => eprintln!("Warning: Invalid DEXTER_TIMEOUT_MS '{}', ignoring", val),
            }
        }

        if let Ok(val) = std::env::var("DEXTER_FIXTURE_FAILURE_RATE") {
            match val.parse::<f64>() {
                Ok(rate) => self.fixtures.failure_rate = rate,
                Err(_) => {
                    eprintln!("Warning: Invalid DEXTER_FIXTURE_FAILURE_RATE '{}', ignoring", val)
                }
            }
        }

        if let Ok(val) = std::env::var("DEXTER_SESSION_FILE") {
            self.session.storage_file = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("DEXTER_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("DEXTER_LOG_FORMAT") {
            match val.parse::<LogFormat>() {
                Ok(format) => self.logging.format = format,
                Err(e) => eprintln!("Warning: {}, ignoring", e),
            }
        }
    }

    pub fn http_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig::default()
            .with_base_url(self.api.base_url.clone())
            .with_timeout(Duration::from_millis(self.api.timeout_ms));
        config.connect_timeout_secs = self.api.connect_timeout_secs;
        if let Some(user_agent) = &self.api.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }

    pub fn fixture_config(&self) -> FixtureConfig {
        FixtureConfig::default()
            .with_delay(
                Duration::from_millis(self.fixtures.min_delay_ms),
                Duration::from_millis(self.fixtures.max_delay_ms),
            )
            .with_failure_rate(self.fixtures.failure_rate)
    }

    /// Session file with `~` expanded; `None` when no file is configured and
    /// there is no home directory to default into
    pub fn session_file(&self) -> Option<PathBuf> {
        match &self.session.storage_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::home_dir().map(|home| home.join(".dexter").join("session.json")),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    dexter_core::request::DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_min_delay_ms() -> u64 {
    200
}

fn default_max_delay_ms() -> u64 {
    800
}

fn default_failure_rate() -> f64 {
    0.05
}
