use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ServiceError;
use crate::types::{
    CalculationRequest, CalculationResponse, DownloadFormat, DownloadResponse, GenerationRequest,
    GenerationResponse, RecommendationRequest, RecommendationResponse,
};

/// Connection settings for [`HttpFilingService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// The external calculation/generation service, seen from the wizard.
#[async_trait]
pub trait FilingService: Send + Sync {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, ServiceError>;

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ServiceError>;

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ServiceError>;

    /// Download the generated return; reuses the generation request
    /// shape and returns the payload with a suggested file name.
    async fn download(
        &self,
        request: &GenerationRequest,
        format: DownloadFormat,
    ) -> Result<DownloadResponse, ServiceError>;
}

/// HTTP implementation of [`FilingService`].
pub struct HttpFilingService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFilingService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<Req, Resp>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self.post(path, request).await?;
        response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }

    async fn post<Req>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<reqwest::Response, ServiceError>
    where
        Req: Serialize + Sync,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "calling filing service");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api(status.as_u16(), message));
        }
        Ok(response)
    }
}

#[async_trait]
impl FilingService for HttpFilingService {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, ServiceError> {
        self.post_json("/calculate-tax", request).await
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ServiceError> {
        self.post_json("/recommend-itr", request).await
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ServiceError> {
        self.post_json("/generate-itr", request).await
    }

    async fn download(
        &self,
        request: &GenerationRequest,
        format: DownloadFormat,
    ) -> Result<DownloadResponse, ServiceError> {
        let path = format!("/download-itr?format={}", format.extension());
        let response = self.post(&path, request).await?;
        let content = response
            .text()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        Ok(DownloadResponse {
            content,
            file_name: DownloadResponse::suggested_file_name(
                &request.taxpayer_profile.pan,
                format,
            ),
        })
    }
}
