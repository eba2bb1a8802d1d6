use std::{env, time::Duration};

use url::Url;

use super::env::{AppConfig, ConfigError, DetectorConfig, DirectoryConfig, LoggingConfig};
use crate::domain::ModelTarget;

pub const BASE_URL_VAR: &str = "PHISHAI_API_BASE_URL";
const DEFAULT_MODEL_VAR: &str = "PHISHAI_DEFAULT_MODEL";
const TIMEOUT_VAR: &str = "PHISHAI_REQUEST_TIMEOUT_MS";
const HEALTH_TIMEOUT_VAR: &str = "PHISHAI_HEALTH_TIMEOUT_MS";
const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_base = var(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let base_url = parse_base_url(&raw_base)?;

        let request_timeout = match var(TIMEOUT_VAR) {
            None => None,
            Some(raw) => {
                let millis = raw.parse::<u64>().map_err(|err| ConfigError::Invalid {
                    key: TIMEOUT_VAR,
                    reason: err.to_string(),
                })?;
                (millis > 0).then(|| Duration::from_millis(millis))
            }
        };

        let health_timeout = match var(HEALTH_TIMEOUT_VAR) {
            None => DEFAULT_HEALTH_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: HEALTH_TIMEOUT_VAR,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        key: HEALTH_TIMEOUT_VAR,
                        reason: err.to_string(),
                    })
                }
            },
        };

        let default_model = match var(DEFAULT_MODEL_VAR) {
            None => ModelTarget::default(),
            Some(raw) => raw.parse::<ModelTarget>().map_err(|err| ConfigError::Invalid {
                key: DEFAULT_MODEL_VAR,
                reason: err.to_string(),
            })?,
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            detector: DetectorConfig {
                base_url,
                request_timeout,
                health_timeout,
            },
            default_model,
            directories,
            logging,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::Invalid {
        key: BASE_URL_VAR,
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            key: BASE_URL_VAR,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(url)
}
