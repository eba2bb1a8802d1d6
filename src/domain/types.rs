use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detection endpoint exposed by the classification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTarget {
    #[default]
    Email,
    Url,
    Umpire,
}

impl ModelTarget {
    pub const ALL: [ModelTarget; 3] = [ModelTarget::Email, ModelTarget::Url, ModelTarget::Umpire];

    /// Path segment appended to the service base URL.
    pub fn path_segment(self) -> &'static str {
        match self {
            ModelTarget::Email => "email",
            ModelTarget::Url => "url",
            ModelTarget::Umpire => "umpire",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelTarget::Email => "Email Detector",
            ModelTarget::Url => "URL Detector",
            ModelTarget::Umpire => "Umpire Model",
        }
    }
}

impl fmt::Display for ModelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown detection model `{0}` (expected email, url or umpire)")]
pub struct UnknownModelTarget(pub String);

impl FromStr for ModelTarget {
    type Err = UnknownModelTarget;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ModelTarget::ALL
            .into_iter()
            .find(|target| target.path_segment() == normalized)
            .ok_or_else(|| UnknownModelTarget(value.trim().to_string()))
    }
}

/// Verdict returned by a detection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: i64,
    pub confidence: f64,
    pub model_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub models_loaded: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_the_three_targets() {
        assert_eq!("email".parse::<ModelTarget>().unwrap(), ModelTarget::Email);
        assert_eq!(" URL ".parse::<ModelTarget>().unwrap(), ModelTarget::Url);
        assert_eq!("umpire".parse::<ModelTarget>().unwrap(), ModelTarget::Umpire);
        assert_eq!(
            "sms".parse::<ModelTarget>().unwrap_err(),
            UnknownModelTarget("sms".to_string())
        );
        assert!("".parse::<ModelTarget>().is_err());
    }

    #[test]
    fn result_deserializes_from_service_body() {
        let result: ClassificationResult =
            serde_json::from_str(r#"{"prediction":1,"confidence":0.9321,"model_type":"url"}"#)
                .unwrap();
        assert_eq!(result.prediction, 1);
        assert_eq!(result.model_type, "url");
    }
}
