use crate::api::types::{HealthResponse, MetricsSnapshot, StatsData};
use crate::error::Result;
use async_trait::async_trait;

/// The four endpoints the dashboard consumes from the metrics server.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// `GET /api/metrics`
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot>;

    /// `GET /api/stats`
    async fn fetch_stats(&self) -> Result<StatsData>;

    /// `POST /api/clear`
    async fn clear_metrics(&self) -> Result<()>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse>;
}
