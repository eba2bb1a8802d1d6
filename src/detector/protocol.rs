use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use url::Url;

use crate::domain::{ClassificationResult, HealthReport};

pub const HEALTH_PATH: &str = "health";

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("base url {base} cannot carry the `{segment}` path")]
    Endpoint { base: Url, segment: &'static str },
    #[error("request to detection server failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("detection server answered with HTTP {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

#[derive(Debug, Serialize)]
pub struct PredictionRequest<'a> {
    pub text: &'a str,
}

pub fn build_request(text: &str) -> PredictionRequest<'_> {
    PredictionRequest { text }
}

/// Appends `segment` to the base path, keeping any prefix such as `/api`.
pub fn endpoint(base: &Url, segment: &'static str) -> Result<Url, DetectorError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| DetectorError::Endpoint {
            base: base.clone(),
            segment,
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

pub async fn parse_response(response: Response) -> Result<ClassificationResult, DetectorError> {
    let result: ClassificationResult = read_json(response).await?;
    if !(0.0..=1.0).contains(&result.confidence) {
        return Err(DetectorError::ConfidenceOutOfRange(result.confidence));
    }
    Ok(result)
}

pub async fn parse_health(response: Response) -> Result<HealthReport, DetectorError> {
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, DetectorError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DetectorError::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
