//! HTTP wrapper around the remote scoring service.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ErrorBody, PredictionResult, RiskFactorInput, ServiceStatus};
use thiserror::Error;
use tracing::{debug, warn};

/// Uniform failure for one scoring call. The display strings are exactly
/// what the form session stores and the user sees.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The request never reached the service or no response came back.
    #[error("{0}")]
    Transport(String),
    /// The service responded with a failure status and a structured detail.
    #[error("{0}")]
    Service(String),
    /// The service responded with a failure status and no usable detail.
    #[error("HTTP {0}")]
    Status(u16),
    /// A success response whose body is not the expected shape.
    #[error("failed to decode scoring response: {0}")]
    Decode(String),
}

/// Seam between the form session and the scoring service, so tests can
/// inject a service double.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Exactly one request per call: no retries, no caching, transport
    /// default timeout.
    async fn predict(&self, input: &RiskFactorInput) -> Result<PredictionResult, ScoringError>;
    async fn health(&self) -> Result<ServiceStatus, ScoringError>;
}

/// Reqwest-backed scoring client. Holds no state between calls beyond the
/// connection pool.
pub struct HttpScoringClient {
    http: Client,
    base_url: String,
}

impl HttpScoringClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn failure_from_response(response: reqwest::Response) -> ScoringError {
        let status = response.status().as_u16();
        warn!(status, "scoring service returned a failure status");
        match response.bytes().await {
            Ok(body) => match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(ErrorBody {
                    detail: Some(detail),
                }) => ScoringError::Service(detail),
                _ => ScoringError::Status(status),
            },
            Err(_) => ScoringError::Status(status),
        }
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringClient {
    async fn predict(&self, input: &RiskFactorInput) -> Result<PredictionResult, ScoringError> {
        let url = format!("{}/predict", self.base_url);
        debug!(%url, "posting prediction request");
        let response = self
            .http
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|err| ScoringError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure_from_response(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ScoringError::Transport(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| ScoringError::Decode(err.to_string()))
    }

    async fn health(&self) -> Result<ServiceStatus, ScoringError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|err| ScoringError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure_from_response(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ScoringError::Transport(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| ScoringError::Decode(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/scoring_tests.rs"]
mod tests;
