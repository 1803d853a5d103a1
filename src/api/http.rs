use crate::api::client::MetricsApi;
use crate::api::types::{ApiEnvelope, HealthResponse, MetricsSnapshot, StatsData};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpMetricsApi {
    base_url: String,
    client: Client,
}

impl HttpMetricsApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");

        self.client
            .request(method, &url)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("{}: {}", url, e)))
    }

    /// Reads an `{ success, data, error }` envelope. The server reports
    /// application failures as HTTP 500 with `success: false`, so the body is
    /// inspected before the status code.
    async fn execute<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<Option<T>> {
        let response = self.send(method, path).await?;
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(AppError::Transport(format!(
                "{} returned HTTP {}",
                path, status
            ))),
            Err(e) => Err(AppError::Parse(format!(
                "Failed to parse {} response: {}",
                path, e
            ))),
        }
    }
}

#[async_trait]
impl MetricsApi for HttpMetricsApi {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
        self.execute(Method::GET, "/api/metrics")
            .await?
            .ok_or_else(|| AppError::Parse("metrics response carried no data".to_string()))
    }

    async fn fetch_stats(&self) -> Result<StatsData> {
        self.execute(Method::GET, "/api/stats")
            .await?
            .ok_or_else(|| AppError::Parse("stats response carried no data".to_string()))
    }

    async fn clear_metrics(&self) -> Result<()> {
        self.execute::<serde_json::Value>(Method::POST, "/api/clear")
            .await?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthResponse> {
        let response = self.send(Method::GET, "/health").await?;

        // An unhealthy server answers 500 with a body that still names its status.
        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse /health response: {}", e)))
    }
}
