//! Application configuration.
//!
//! Values come from a YAML file and are then overridden by `GREETER_*`
//! environment variables. The file is `$GREETER_CONFIG` when set, otherwise
//! the first of [`default_config_paths`] that exists: `config/application.yml`
//! under the working directory, then the one shipped next to this crate's
//! manifest. Every key has a default, so an empty file, or no file at all, is
//! a valid configuration.

use crate::template::{DEFAULT_TEMPLATE, Template, TemplateError};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

pub const CONFIG_PATH_ENV: &str = "GREETER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/application.yml";

/// Candidate files tried in order when `$GREETER_CONFIG` is unset.
pub fn default_config_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(DEFAULT_CONFIG_PATH),
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH),
    ]
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("can't parse config: {source}")]
    Parse {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue { key: &'static str, value: String, reason: String },

    #[error("invalid greeting template: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },
}

impl ConfigError {
    fn invalid_value<R: ToString>(key: &'static str, value: &str, reason: R) -> Self {
        Self::InvalidValue { key, value: value.to_string(), reason: reason.to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub greeting: GreetingConfig,
    pub job: JobConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub address: String,
    pub max_body_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: "127.0.0.1:8080".to_string(), max_body_size: 64 * 1024 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GreetingConfig {
    pub template: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub enabled: bool,
    pub fixed_delay_secs: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self { enabled: true, fixed_delay_secs: 30 }
    }
}

impl JobConfig {
    pub fn fixed_delay(&self) -> Duration {
        Duration::from_secs(self.fixed_delay_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl AppConfig {
    /// Loads from the process environment and [`default_config_paths`].
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        Self::load_with(|key| std::env::var(key).ok(), &default_config_paths())
    }

    /// Loads with `env` standing in for the process environment. Without
    /// `$GREETER_CONFIG`, the first existing file of `search` is read.
    pub fn load_with<E, P>(env: E, search: &[P]) -> Result<(Self, ConfigSource), ConfigError>
    where
        E: Fn(&str) -> Option<String>,
        P: AsRef<Path>,
    {
        let source = match env(CONFIG_PATH_ENV) {
            Some(path) => ConfigSource::File(PathBuf::from(path)),
            None => search
                .iter()
                .map(AsRef::<Path>::as_ref)
                .find(|path| path.is_file())
                .map_or(ConfigSource::Defaults, |path| ConfigSource::File(path.to_path_buf())),
        };
        let mut config = match &source {
            ConfigSource::File(path) => Self::from_file(path)?,
            ConfigSource::Defaults => Self::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok((config, source))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env<E>(&mut self, env: E) -> Result<(), ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("GREETER_SERVER_ADDRESS") {
            self.server.address = value;
        }
        if let Some(value) = env("GREETER_SERVER_MAX_BODY_SIZE") {
            self.server.max_body_size = parse_value("server.max_body_size", &value)?;
        }
        if let Some(value) = env("GREETER_GREETING_TEMPLATE") {
            self.greeting.template = value;
        }
        if let Some(value) = env("GREETER_JOB_ENABLED") {
            self.job.enabled = parse_value("job.enabled", &value)?;
        }
        if let Some(value) = env("GREETER_JOB_FIXED_DELAY_SECS") {
            self.job.fixed_delay_secs = parse_value("job.fixed_delay_secs", &value)?;
        }
        if let Some(value) = env("GREETER_LOG_LEVEL") {
            self.logging.level = value;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.template()?;
        self.log_level()?;
        if self.job.fixed_delay_secs == 0 {
            return Err(ConfigError::invalid_value("job.fixed_delay_secs", "0", "must be positive"));
        }
        Ok(())
    }

    pub fn template(&self) -> Result<Template, ConfigError> {
        Ok(Template::parse(&self.greeting.template)?)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        parse_value("logging.level", &self.logging.level)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::invalid_value(key, value, e))
}
