//! Practice server client
//!
//! The only network code. Every failure surfaces as a `SubmitError` and the
//! completion flow falls back to local progress.

use std::time::Duration;

use async_trait::async_trait;

use super::wire::{HealthResponse, PerformanceSubmission, ServerResult};
use crate::error::SubmitError;

/// Sends completed performances to the server
#[async_trait]
pub trait PerformanceSubmitter: Send + Sync {
    async fn submit_performance(
        &self,
        submission: &PerformanceSubmission,
    ) -> Result<ServerResult, SubmitError>;
}

/// Reports whether the server looks reachable. Informational only.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn is_server_reachable(&self) -> bool;
}

/// HTTP client for the practice server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sightreadpro/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PerformanceSubmitter for ApiClient {
    async fn submit_performance(
        &self,
        submission: &PerformanceSubmission,
    ) -> Result<ServerResult, SubmitError> {
        let url = self.url("/users/submit_performance");
        log::debug!("POST {} (exercise {})", url, submission.exercise_id);

        let response = self.client.post(&url).json(submission).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let result: ServerResult = response.json().await?;
        log::debug!("Server confirmed exercise {}: {:?}", submission.exercise_id, result);
        Ok(result)
    }
}

#[async_trait]
impl HealthCheck for ApiClient {
    async fn is_server_reachable(&self) -> bool {
        let url = self.url("/health");
        let response = match self.client.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                log::debug!("Health check returned {}", r.status());
                return false;
            }
            Err(e) => {
                log::debug!("Health check failed: {}", e);
                return false;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(body) => body.status.as_deref() == Some("healthy"),
            Err(e) => {
                log::debug!("Unreadable health response: {}", e);
                false
            }
        }
    }
}

/// Submitter used when the server is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSubmitter;

#[async_trait]
impl PerformanceSubmitter for OfflineSubmitter {
    async fn submit_performance(
        &self,
        _submission: &PerformanceSubmission,
    ) -> Result<ServerResult, SubmitError> {
        Err(SubmitError::Offline)
    }
}

#[async_trait]
impl HealthCheck for OfflineSubmitter {
    async fn is_server_reachable(&self) -> bool {
        false
    }
}
