use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    config::DetectorConfig,
    domain::{ClassificationResult, HealthReport, ModelTarget},
};

use super::protocol::{
    build_request, endpoint, parse_health, parse_response, DetectorError, HEALTH_PATH,
};

/// Anything able to classify text against one of the detection targets.
#[async_trait]
pub trait DetectionBackend: Send + Sync + 'static {
    async fn classify(
        &self,
        target: ModelTarget,
        text: &str,
    ) -> Result<ClassificationResult, DetectorError>;
}

#[derive(Clone)]
pub struct DetectorClient {
    http: Client,
    config: DetectorConfig,
}

impl DetectorClient {
    pub fn new(http: Client, config: DetectorConfig) -> Self {
        Self { http, config }
    }

    pub fn endpoint(&self, target: ModelTarget) -> Result<Url, DetectorError> {
        endpoint(&self.config.base_url, target.path_segment())
    }

    pub async fn health(&self) -> Result<HealthReport, DetectorError> {
        let url = endpoint(&self.config.base_url, HEALTH_PATH)?;
        let response = self
            .http
            .get(url)
            .timeout(self.config.health_timeout)
            .send()
            .await?;
        parse_health(response).await
    }
}

#[async_trait]
impl DetectionBackend for DetectorClient {
    async fn classify(
        &self,
        target: ModelTarget,
        text: &str,
    ) -> Result<ClassificationResult, DetectorError> {
        let url = self.endpoint(target)?;
        tracing::debug!(target: "detector", %url, chars = text.chars().count(), "sending classification request");

        let mut request = self.http.post(url).json(&build_request(text));
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        parse_response(response).await
    }
}
