use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::domain::ModelTarget;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub default_model: ModelTarget,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub base_url: Url,
    /// `None` leaves a request pending until the server answers.
    pub request_timeout: Option<Duration>,
    /// Health checks are always bounded so the shell never hangs on them.
    pub health_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
